use criterion::*;
use geo::Rect;

const BBOX: [f64; 2] = [1024., 1024.];

#[path = "utils/random.rs"]
mod random;
#[path = "utils/crossings.rs"]
mod crossings;

use crossings::*;
use rand::thread_rng;
use random::*;

fn length_lc(c: &mut Criterion) {
    const NUM_LINES: usize = 1024;

    let bbox: Rect<f64> = Rect::new([0., 0.], BBOX);
    let line_len = BBOX[0] / 5.;

    let lines = short_lines(&mut thread_rng(), NUM_LINES, bbox, line_len);
    let input = segments(&lines);
    c.bench_function("Bentley-Ottman - short random lines", |b| {
        b.iter(|| black_box(count_sweep(&input)))
    });
    c.bench_function("Brute-Force - short random lines", |b| {
        b.iter(|| black_box(count_naive(&input)))
    });
}

fn uniform_lc(c: &mut Criterion) {
    const NUM_LINES: usize = 1024;
    let bbox: Rect<f64> = Rect::new([0., 0.], BBOX);

    let lines = uniform_lines(&mut thread_rng(), NUM_LINES, bbox);
    let input = segments(&lines);
    c.bench_function("Bentley-Ottman - uniform random lines", |b| {
        b.iter(|| black_box(count_sweep(&input)))
    });
    c.bench_function("Brute-Force - uniform random lines", |b| {
        b.iter(|| black_box(count_brute(&lines)))
    });
}

criterion_group!(random, uniform_lc, length_lc);
criterion_main!(random);
