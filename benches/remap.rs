use criterion::{Criterion, black_box, criterion_group, criterion_main};
use palettree::Palette;
use rand::Rng;

fn random_bytes(count: usize) -> Vec<u8> {
    let mut rng = rand::thread_rng();
    (0..count).map(|_| rng.r#gen()).collect()
}

fn benchmark_remap(c: &mut Criterion) {
    // 256x256 RGBA source, 64x64 RGB palette image
    let source = random_bytes(256 * 256 * 4);
    let palette = Palette::from_bytes(&random_bytes(64 * 64 * 3), 3);

    c.bench_function("remap_256x256", |b| {
        b.iter(|| {
            let mut pixels = source.clone();
            palette.remap_bytes(black_box(&mut pixels), 4).ok();
            pixels
        })
    });
}

criterion_group!(benches, benchmark_remap);
criterion_main!(benches);
