//! Reference click tracks with hand-computed expectations.

/// A beat specification together with the layout it must produce.
#[derive(Debug, Clone, Copy)]
pub struct ReferenceCase {
    pub name: &'static str,
    pub clicks: i64,
    pub elapsed_seconds: f64,
    pub base_beats: i64,
    pub subdivision: i64,
    /// Samples in the data chunk.
    pub num_samples: usize,
    /// Start offsets of the first clicks, in order.
    pub first_onsets: &'static [usize],
    /// Clicks that fit in the track.
    pub clicks_placed: u64,
}

/// Cases covering whole beats, subdivisions and beats that do not fit.
pub const REFERENCE_CASES: &[ReferenceCase] = &[
    // 120 BPM, four beats: two seconds with a click every half second.
    ReferenceCase {
        name: "four_at_120",
        clicks: 4,
        elapsed_seconds: 2.0,
        base_beats: 4,
        subdivision: 1,
        num_samples: 88_200,
        first_onsets: &[0, 22_050, 44_100, 66_150],
        clicks_placed: 4,
    },
    ReferenceCase {
        name: "four_at_120_halves",
        clicks: 4,
        elapsed_seconds: 2.0,
        base_beats: 4,
        subdivision: 2,
        num_samples: 88_200,
        first_onsets: &[0, 11_025, 22_050, 33_075],
        clicks_placed: 8,
    },
    // 60 BPM, one beat: a single click at the start of one second.
    ReferenceCase {
        name: "one_at_60",
        clicks: 1,
        elapsed_seconds: 1.0,
        base_beats: 1,
        subdivision: 1,
        num_samples: 44_100,
        first_onsets: &[0],
        clicks_placed: 1,
    },
    // Three clicks over one second, three beats: 44100 samples, beats every
    // 14700 samples.
    ReferenceCase {
        name: "three_per_second",
        clicks: 3,
        elapsed_seconds: 1.0,
        base_beats: 3,
        subdivision: 1,
        num_samples: 44_100,
        first_onsets: &[0, 14_700, 29_400],
        clicks_placed: 3,
    },
    // A tempo so fast the track is shorter than one click.
    ReferenceCase {
        name: "too_short_for_a_click",
        clicks: 44_100,
        elapsed_seconds: 0.0001,
        base_beats: 1,
        subdivision: 1,
        num_samples: 0,
        first_onsets: &[],
        clicks_placed: 0,
    },
];
