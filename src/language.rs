#[derive(Debug)]
pub struct LanguageSpec {
    pub name: &'static str,
    pub extensions: &'static [&'static str],
    pub filenames: &'static [&'static str],
}

macro_rules! lang {
    ($name:expr, ext: [$($ext:expr),*]) => {
        LanguageSpec { name: $name, extensions: &[$($ext),*], filenames: &[] }
    };
    ($name:expr, ext: [$($ext:expr),*], files: [$($f:expr),*]) => {
        LanguageSpec { name: $name, extensions: &[$($ext),*], filenames: &[$($f),*] }
    };
}

pub fn languages() -> &'static [LanguageSpec] {
    static LANGUAGES: &[LanguageSpec] = &[
        lang!("Rust", ext: ["rs"]),
        lang!("Python", ext: ["py", "pyi"]),
        lang!("JavaScript", ext: ["js", "mjs", "cjs", "jsx"]),
        lang!("TypeScript", ext: ["ts", "mts", "cts", "tsx"]),
        lang!("Java", ext: ["java"]),
        lang!("C", ext: ["c", "h"]),
        lang!("C++", ext: ["cpp", "cxx", "cc", "hpp", "hxx", "hh"]),
        lang!("C#", ext: ["cs"]),
        lang!("Go", ext: ["go"]),
        lang!("Ruby", ext: ["rb"], files: ["Rakefile", "Gemfile"]),
        lang!("Shell", ext: ["sh", "bash", "zsh"]),
        lang!("HTML", ext: ["html", "htm"]),
        lang!("CSS", ext: ["css", "scss", "sass", "less"]),
        lang!("SQL", ext: ["sql"]),
        lang!("TOML", ext: ["toml"]),
        lang!("YAML", ext: ["yaml", "yml"]),
        lang!("JSON", ext: ["json"]),
        lang!("Markdown", ext: ["md", "markdown"]),
        lang!("Kotlin", ext: ["kt", "kts"]),
        lang!("Swift", ext: ["swift"]),
        lang!("PHP", ext: ["php"]),
        lang!("Dart", ext: ["dart"]),
        lang!("Haskell", ext: ["hs"]),
        lang!("Lua", ext: ["lua"]),
        lang!("Perl", ext: ["pl", "pm"]),
        lang!("R", ext: ["r", "R"]),
        lang!("Scala", ext: ["scala", "sc", "sbt"]),
        lang!("XML", ext: ["xml", "xsl", "xslt", "svg"]),
        lang!("Dockerfile", ext: [], files: ["Dockerfile"]),
        lang!("Makefile", ext: ["mk"], files: ["Makefile", "makefile", "GNUmakefile"]),
        lang!("Elixir", ext: ["ex", "exs"]),
        lang!("Clojure", ext: ["clj", "cljs", "cljc", "edn"]),
        lang!("Zig", ext: ["zig"]),
        lang!("Objective-C", ext: ["m", "mm"]),
        lang!("OCaml", ext: ["ml", "mli"]),
        lang!("F#", ext: ["fs", "fsi", "fsx"]),
        lang!("Nim", ext: ["nim"]),
        lang!("Julia", ext: ["jl"]),
        lang!("Terraform", ext: ["tf"]),
        lang!("Groovy", ext: ["groovy", "gradle"]),
        lang!("Erlang", ext: ["erl", "hrl"]),
        lang!("Text", ext: ["txt"]),
    ];
    LANGUAGES
}

/// Case-insensitive lookup by language name.
pub fn find(name: &str) -> Option<&'static LanguageSpec> {
    languages()
        .iter()
        .find(|spec| spec.name.eq_ignore_ascii_case(name.trim()))
}
