use super::*;

fn file(path: &str, facts: &[(&str, usize, Option<&str>)]) -> FileBlame {
    let mut blame = FileBlame {
        path: PathBuf::from(path),
        ..FileBlame::default()
    };
    for (commit, lines, author) in facts {
        *blame.lines.entry(commit.to_string()).or_insert(0) += lines;
        if let Some(author) = author {
            blame
                .identities
                .insert(commit.to_string(), author.to_string());
        }
    }
    blame
}

fn stats_of(agg: &Aggregator, name: &str) -> Statistics {
    agg.reduce()
        .into_iter()
        .find(|a| a.name == name)
        .unwrap_or_else(|| panic!("{name} missing"))
        .stats
}

/// File A: c1 by Alice (10 lines). File B: c1 continuation (5) and c2 by
/// Bob (3). File C: c2 continuation (2).
fn three_files() -> Vec<FileBlame> {
    vec![
        file("a.rs", &[("c1", 10, Some("Alice"))]),
        file("b.rs", &[("c1", 5, None), ("c2", 3, Some("Bob"))]),
        file("c.rs", &[("c2", 2, None)]),
    ]
}

#[test]
fn merges_across_files() {
    let mut agg = Aggregator::new();
    for f in three_files() {
        agg.merge(f).unwrap();
    }
    agg.ensure_resolved().unwrap();

    assert_eq!(
        stats_of(&agg, "Alice"),
        Statistics {
            lines: 15,
            commits: 1,
            files: 2
        }
    );
    assert_eq!(
        stats_of(&agg, "Bob"),
        Statistics {
            lines: 5,
            commits: 1,
            files: 2
        }
    );
    assert_eq!(agg.reduce().len(), 2);
}

#[test]
fn merge_order_does_not_matter() {
    let orders: [[usize; 3]; 6] = [
        [0, 1, 2],
        [0, 2, 1],
        [1, 0, 2],
        [1, 2, 0],
        [2, 0, 1],
        [2, 1, 0],
    ];
    let mut expected: Option<Vec<RankedAuthor>> = None;

    for order in orders {
        let files = three_files();
        let mut agg = Aggregator::new();
        for i in order {
            agg.merge(files[i].clone()).unwrap();
        }
        agg.ensure_resolved().unwrap();

        let mut got = agg.reduce();
        got.sort_by(|a, b| a.name.cmp(&b.name));
        match &expected {
            Some(e) => assert_eq!(&got, e, "order {order:?}"),
            None => expected = Some(got),
        }
    }
}

#[test]
fn repeated_commit_counts_once() {
    let mut agg = Aggregator::new();
    for i in 0..5 {
        agg.merge(file(
            &format!("f{i}.rs"),
            &[("c1", 2, Some("Alice")), ("c2", 1, Some("Alice"))],
        ))
        .unwrap();
    }

    let alice = stats_of(&agg, "Alice");
    assert_eq!(alice.commits, 2);
    assert_eq!(alice.files, 5);
    assert_eq!(alice.lines, 15);
}

#[test]
fn file_counted_once_per_author() {
    let mut agg = Aggregator::new();
    agg.merge(file(
        "a.rs",
        &[
            ("c1", 1, Some("Alice")),
            ("c2", 1, Some("Alice")),
            ("c3", 1, Some("Alice")),
        ],
    ))
    .unwrap();
    assert_eq!(stats_of(&agg, "Alice").files, 1);
}

#[test]
fn zero_line_fallback_still_counts() {
    let mut agg = Aggregator::new();
    agg.merge(file("empty.txt", &[("c3", 0, Some("Carol"))]))
        .unwrap();

    assert_eq!(
        stats_of(&agg, "Carol"),
        Statistics {
            lines: 0,
            commits: 1,
            files: 1
        }
    );
}

#[test]
fn case_differing_names_stay_separate() {
    let mut agg = Aggregator::new();
    agg.merge(file("a.rs", &[("c1", 1, Some("alice")), ("c2", 1, Some("Alice"))]))
        .unwrap();
    assert_eq!(agg.reduce().len(), 2);
}

#[test]
fn unresolved_commit_is_reported() {
    let mut agg = Aggregator::new();
    agg.merge(file("a.rs", &[("c9", 4, None)])).unwrap();
    let err = agg.ensure_resolved().unwrap_err();
    assert!(matches!(err, Error::UnresolvedCommit(ref c) if c == "c9"));
    assert!(agg.reduce().is_empty());
}

#[test]
fn conflicting_identity_leaves_tables_untouched() {
    let mut agg = Aggregator::new();
    agg.merge(file("a.rs", &[("c1", 3, Some("Alice"))])).unwrap();

    let err = agg
        .merge(file("b.rs", &[("c1", 7, Some("Mallory"))]))
        .unwrap_err();
    assert!(matches!(err, Error::ConflictingIdentity { .. }));

    assert_eq!(
        stats_of(&agg, "Alice"),
        Statistics {
            lines: 3,
            commits: 1,
            files: 1
        }
    );
    assert_eq!(agg.totals().files, 1);
}

#[test]
fn totals_cover_all_commits() {
    let mut agg = Aggregator::new();
    for f in three_files() {
        agg.merge(f).unwrap();
    }
    assert_eq!(
        agg.totals(),
        Totals {
            files: 3,
            lines: 20,
            commits: 2
        }
    );
}

#[test]
fn empty_aggregator() {
    let agg = Aggregator::new();
    assert!(agg.reduce().is_empty());
    assert!(agg.ensure_resolved().is_ok());
    assert_eq!(agg.totals(), Totals::default());
}
