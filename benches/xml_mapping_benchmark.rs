use criterion::{criterion_group, criterion_main, Criterion};
use linkedin_connect::services::linkedin_xml::{parse_connections, parse_profile, parse_updates};
use std::fs;
use std::hint::black_box;

/// Repeat the `<person>` entries of the connections fixture to get a
/// realistically large network.
fn large_connections(fixture: &str, copies: usize) -> String {
    let start = fixture.find("<person>").expect("fixture has a person");
    let end = fixture.rfind("</connections>").expect("fixture is closed");
    let people = &fixture[start..end];

    format!(
        "<connections total=\"{}\">{}</connections>",
        copies * 3,
        people.repeat(copies)
    )
}

fn benchmark_xml_mapping(c: &mut Criterion) {
    let profile = fs::read_to_string("tests/fixtures/profile.xml").expect("Failed to read fixture");
    let connections =
        fs::read_to_string("tests/fixtures/connections.xml").expect("Failed to read fixture");
    let updates = fs::read_to_string("tests/fixtures/updates.xml").expect("Failed to read fixture");
    let network = large_connections(&connections, 170);

    let mut group = c.benchmark_group("xml_mapping");

    group.bench_function("profile", |b| {
        b.iter(|| parse_profile(black_box(&profile)))
    });

    group.bench_function("updates", |b| {
        b.iter(|| parse_updates(black_box(&updates)))
    });

    group.bench_function("connections_500", |b| {
        b.iter(|| parse_connections(black_box(&network)))
    });

    group.finish();
}

criterion_group!(benches, benchmark_xml_mapping);
criterion_main!(benches);
