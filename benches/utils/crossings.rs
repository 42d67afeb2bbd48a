#![allow(dead_code)]

use geo::{
    line_intersection::{line_intersection, LineIntersection},
    Line,
};
use segment_crossings::{find_crossings, naive, Segment, SweepConfig};

pub fn segments(lines: &[Line<f64>]) -> Vec<Segment<f64>> {
    Segment::from_lines(lines.iter().copied()).expect("random lines are not vertical")
}

pub fn count_sweep(segments: &[Segment<f64>]) -> usize {
    find_crossings(segments.iter().copied()).len()
}

pub fn count_naive(segments: &[Segment<f64>]) -> usize {
    naive::find_crossings(segments, SweepConfig::default()).len()
}

pub fn count_brute(lines: &[Line<f64>]) -> usize {
    let mut count = 0;
    let n = lines.len();
    for i in 0..n {
        let l1 = &lines[i];
        for j in i + 1..n {
            let l2 = &lines[j];
            if let Some(LineIntersection::SinglePoint {
                is_proper: true, ..
            }) = line_intersection(*l1, *l2)
            {
                count += 1;
            }
        }
    }
    count
}
