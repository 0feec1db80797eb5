use criterion::{Criterion, criterion_group, criterion_main};
use rack_elevation_engine::{HtmlWriter, RackParser, Renderer, render_document};

/// A full 42U rack of 2U servers with links and comments, `racks` times over.
fn generate_document(racks: usize) -> String {
    let mut text = String::new();
    for rack in 0..racks {
        text.push_str(&format!("<rack name=R{rack} height=42>\n"));
        for u in (1..=41).step_by(2) {
            text.push_str(&format!(
                "{u} 2 \"Dell R740\" host-{rack}-{u} link:[[servers/host-{rack}-{u}|Host {u}]] rack {rack}\n"
            ));
        }
        text.push_str("</rack>\n");
    }
    text
}

fn bench_render_document(c: &mut Criterion) {
    let mut group = c.benchmark_group("render");
    group.sample_size(10);

    let text = generate_document(20);
    let parser = RackParser::default();
    let renderer = Renderer::default();

    group.bench_function("parse_and_layout", |b| {
        b.iter(|| {
            let outputs = render_document(std::hint::black_box(&text), &parser, &renderer);
            std::hint::black_box(outputs);
        });
    });

    let outputs = render_document(&text, &parser, &renderer);
    group.bench_function("html", |b| {
        b.iter(|| {
            let mut writer = HtmlWriter::new();
            let html: Vec<String> = outputs.iter().map(|o| writer.rack(o)).collect();
            std::hint::black_box(html);
        });
    });

    group.finish();
}

criterion_group!(benches, bench_render_document);
criterion_main!(benches);
