use std::hint::black_box;

use codspeed_criterion_compat::{
    BenchmarkId, Criterion, Throughput, criterion_group, criterion_main,
};
use lgc_inputs::File;
use lgc_parse::FileParse as _;

fn benchmark_parser(c: &mut Criterion) {
    let db = salsa::DatabaseImpl::new();
    let files = vec![
        File::new(
            &db,
            "Simple".into(),
            r#"
            locale = en-US
            timeout = 30
            "#
            .to_string(),
        ),
        File::new(
            &db,
            "Medium".into(),
            r#"
            app = demo
            locale = en-US
            retries = 3

            welcome = {Hello, ${user}!}
            tour = {See #{welcome} and ${cta} to begin}
            footer = {\{c\} 2024 demo}
            title = #app
            "#
            .to_string(),
        ),
    ];

    let mut group = c.benchmark_group("Parser Benchmark");

    for file in files {
        let code_length = file.text(&db).len() as u64;
        group.throughput(Throughput::Bytes(code_length));
        group.bench_with_input(
            BenchmarkId::new("parse_code", file.path(&db)),
            &file,
            |b, &file| {
                b.iter(|| {
                    let parse = file.parse(&db);
                    black_box(parse);
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, benchmark_parser);
criterion_main!(benches);
