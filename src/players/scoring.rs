// Fantasy point scoring under fixed PPR weights.

use crate::providers::round1;

/// Counting stats that feed the scoring formula.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScoringInput {
    pub pass_yds: u32,
    pub pass_td: u32,
    pub interceptions: u32,
    pub rush_yds: u32,
    pub rush_td: u32,
    pub rec_yds: u32,
    pub rec_td: u32,
    pub receptions: u32,
}

/// Fixed scoring weights: +4/pass TD, +1 per 25 pass yds, -2/INT,
/// +6/rush TD, +1 per 10 rush yds, +6/rec TD, +1 per 10 rec yds,
/// +1/reception. Rounded to one decimal.
pub fn fantasy_points(s: ScoringInput) -> f64 {
    let points = f64::from(s.pass_td) * 4.0
        + f64::from(s.pass_yds) / 25.0
        - f64::from(s.interceptions) * 2.0
        + f64::from(s.rush_td) * 6.0
        + f64::from(s.rush_yds) / 10.0
        + f64::from(s.rec_td) * 6.0
        + f64::from(s.rec_yds) / 10.0
        + f64::from(s.receptions);
    round1(points)
}
