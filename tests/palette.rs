use palettree::{KdTreeError, Palette, count_unique_colors, distance_sq, pixels};
use rand::Rng;

#[test]
fn test_remap_picks_closest_palette_color() {
    let mut rng = rand::thread_rng();
    let palette_bytes: Vec<u8> = (0..3 * 500).map(|_| rng.r#gen()).collect();
    let palette = Palette::from_bytes(&palette_bytes, 3);
    assert_eq!(palette.len(), count_unique_colors(pixels(&palette_bytes, 3)));

    let source: Vec<_> = (0..1000)
        .map(|_| [rng.gen_range(0..256), rng.gen_range(0..256), rng.gen_range(0..256)])
        .collect();
    let remapped = palette.remap(&source).unwrap();
    assert_eq!(remapped.len(), source.len());

    for (src, out) in source.iter().zip(&remapped) {
        assert!(palette.colors().contains(out));
        let best = palette.colors().iter().map(|c| distance_sq(c, src)).min().unwrap();
        assert_eq!(distance_sq(out, src), best);
    }
}

#[test]
fn test_remap_bytes_matches_remap() {
    let palette = Palette::from_colors(vec![[0, 0, 0], [128, 128, 128], [255, 0, 0], [0, 0, 255]]);

    let mut rgba = vec![
        10, 5, 0, 255, //
        140, 120, 130, 0, //
        250, 10, 10, 128, //
        10, 20, 200, 64,
    ];
    palette.remap_bytes(&mut rgba, 4).unwrap();
    assert_eq!(
        rgba,
        vec![
            0, 0, 0, 255, //
            128, 128, 128, 0, //
            255, 0, 0, 128, //
            0, 0, 255, 64,
        ]
    );
}

#[test]
fn test_palette_independent_of_scan_order() {
    let a = Palette::from_colors(vec![[3, 2, 1], [1, 2, 3], [2, 2, 2]]);
    let b = Palette::from_colors(vec![[2, 2, 2], [3, 2, 1], [1, 2, 3], [1, 2, 3]]);
    assert_eq!(a.colors(), b.colors());
}

#[test]
fn test_empty_palette_is_an_error() {
    let palette = Palette::from_bytes(&[], 4);
    assert_eq!(palette.nearest(&[0, 0, 0]), Err(KdTreeError::EmptyIndexQuery));
}
