use codspeed_criterion_compat::{
    Criterion, Throughput, black_box, criterion_group, criterion_main,
};

static RULES: &str = "
locale = en-US
retry-limit = 3
timeout.seconds = 30
cache.size = 4096
locale = en-US
retry-limit = 3
timeout.seconds = 30
cache.size = 4096
locale = en-US
retry-limit = 3
timeout.seconds = 30
cache.size = 4096
locale = en-US
retry-limit = 3
timeout.seconds = 30
cache.size = 4096
locale = en-US
retry-limit = 3
timeout.seconds = 30
cache.size = 4096
locale = en-US
retry-limit = 3
timeout.seconds = 30
cache.size = 4096
locale = en-US
retry-limit = 3
timeout.seconds = 30
cache.size = 4096
locale = en-US
retry-limit = 3
timeout.seconds = 30
cache.size = 4096
";

static IDENTIFIERS: &str =
    "app.name app.title window.width window.height theme.foreground theme.background \
     retry-limit default-locale cache.size cache.ttl net.timeout net.proxy log.level \
     app.name app.title window.width window.height theme.foreground theme.background \
     retry-limit default-locale cache.size cache.ttl net.timeout net.proxy log.level \
     app.name app.title window.width window.height theme.foreground theme.background \
     retry-limit default-locale cache.size cache.ttl net.timeout net.proxy log.level \
     app.name app.title window.width window.height theme.foreground theme.background \
     retry-limit default-locale cache.size cache.ttl net.timeout net.proxy log.level \
     app.name app.title window.width window.height theme.foreground theme.background \
     retry-limit default-locale cache.size cache.ttl net.timeout net.proxy log.level";

static LITERALS: &str = "
welcome = {Hello, ${user}! Meet #{guide} at ${place}.}
farewell = {Goodbye ${user}, see #{tour} next time \\{soon\\}}
welcome = {Hello, ${user}! Meet #{guide} at ${place}.}
farewell = {Goodbye ${user}, see #{tour} next time \\{soon\\}}
welcome = {Hello, ${user}! Meet #{guide} at ${place}.}
farewell = {Goodbye ${user}, see #{tour} next time \\{soon\\}}
welcome = {Hello, ${user}! Meet #{guide} at ${place}.}
farewell = {Goodbye ${user}, see #{tour} next time \\{soon\\}}
welcome = {Hello, ${user}! Meet #{guide} at ${place}.}
farewell = {Goodbye ${user}, see #{tour} next time \\{soon\\}}
welcome = {Hello, ${user}! Meet #{guide} at ${place}.}
farewell = {Goodbye ${user}, see #{tour} next time \\{soon\\}}
welcome = {Hello, ${user}! Meet #{guide} at ${place}.}
farewell = {Goodbye ${user}, see #{tour} next time \\{soon\\}}
welcome = {Hello, ${user}! Meet #{guide} at ${place}.}
farewell = {Goodbye ${user}, see #{tour} next time \\{soon\\}}
";

static CANDIDATES: [(&str, &str); 3] =
    [("identifiers", IDENTIFIERS), ("attribute_rules", RULES), ("literals_and_refs", LITERALS)];

fn iterate(s: &str) {
    use lgc_tokenizer::{SyntaxKind, Tokenizer};

    let mut tokenizer = Tokenizer::new(s);

    loop {
        let next_token = tokenizer.next_token();

        if next_token.kind == SyntaxKind::EOF {
            break;
        }

        black_box(next_token);
    }
}

fn bench_iterate(c: &mut Criterion) {
    let mut group = c.benchmark_group("iterate");

    for (name, source) in CANDIDATES {
        group.throughput(Throughput::Bytes(source.len() as u64));
        group.bench_with_input(name, &source, |b, &s| b.iter(|| iterate(s)));
    }
}

criterion_group!(benches, bench_iterate);
criterion_main!(benches);
