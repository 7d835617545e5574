use criterion::{Criterion, criterion_group, criterion_main};
use dockerls_core::diag::ValidatorSettings;
use dockerls_core::{analyze, text::Document, token::Dockerfile};
use std::hint::black_box;

fn sample(stages: usize) -> String {
    let mut out = String::from("# syntax=docker/dockerfile:1\nARG BASE=alpine:3.19\n");
    for i in 0..stages {
        out.push_str(&format!("FROM $BASE AS stage{i}\n"));
        out.push_str("ARG VERSION=1.0\nENV PATH=/opt/bin:$PATH HOME=/root\n");
        out.push_str("RUN apk add --no-cache \\\n      curl \\\n      git \\\n    && rm -rf /var/cache/apk/*\n");
        out.push_str(&format!("COPY --from=stage{} --chown=1:1 /src /dst\n", i.saturating_sub(1)));
        out.push_str("EXPOSE 80/tcp 443 8000-8010/udp\n");
        out.push_str("HEALTHCHECK --interval=30s --timeout=5s --retries=3 CMD curl -f http://localhost/ || exit 1\n");
        out.push_str("CMD [\"/bin/app\", \"--version\", \"${VERSION}\"]\n");
    }
    out
}

fn validate_bench(c: &mut Criterion) {
    let small = sample(2);
    let large = sample(200);
    let settings = ValidatorSettings::default();

    c.bench_function("tokenize_large", |b| {
        let doc = Document::new(large.as_str());
        b.iter(|| black_box(Dockerfile::parse(&doc)))
    });
    c.bench_function("analyze_small", |b| {
        b.iter(|| black_box(analyze(black_box(&small), &settings)))
    });
    c.bench_function("analyze_large", |b| {
        b.iter(|| black_box(analyze(black_box(&large), &settings)))
    });
}

criterion_group!(benches, validate_bench);
criterion_main!(benches);
