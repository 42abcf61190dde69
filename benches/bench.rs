use criterion::{black_box, criterion_group, criterion_main, Criterion};

use mimir_router::Pattern;

// The full route table of the desktop editor.
const PATTERNS: &[&str] = &[
    "",
    "new",
    "open",
    "recent",
    "favorites",
    "settings",
    "settings/:section",
    "about",
    "view/:path+",
    "edit/:path+",
    "export/pdf/:path+",
    "export/text/:path+",
];

const URLS: &[&str] = &[
    "",
    "settings",
    "settings/appearance",
    "edit/a.mimir",
    "edit/docs/guides/getting-started.mimir",
    "export/pdf/docs/report%202024.mimir",
    "no/such/page",
];

fn match_routes(c: &mut Criterion) {
    let mut group = c.benchmark_group("Match Routes");

    let patterns: Vec<Pattern> = PATTERNS
        .iter()
        .map(|pattern| Pattern::parse(pattern).unwrap())
        .collect();

    group.bench_function("route table scan", |b| {
        b.iter(|| {
            for url in black_box(URLS) {
                let found = patterns
                    .iter()
                    .find_map(|pattern| pattern.matches(url));
                black_box(found);
            }
        });
    });

    let catch_all = Pattern::parse("edit/:path+").unwrap();
    let deep = "edit/a/b/c/d/e/f/g/h/i/j/file.mimir";
    group.bench_function("deep catch-all", |b| {
        b.iter(|| {
            let params = black_box(catch_all.matches(black_box(deep)).unwrap());
            assert_eq!(params.len(), 1);
        });
    });

    let encoded = Pattern::parse("open/:name").unwrap();
    group.bench_function("percent-decoded param", |b| {
        b.iter(|| {
            let params = black_box(encoded.matches(black_box("open/caf%C3%A9%20menu")).unwrap());
            assert_eq!(params.get("name"), Some("café menu"));
        });
    });

    group.finish();
}

criterion_group!(benches, match_routes);
criterion_main!(benches);
