//! Click synthesis.
//!
//! Renders a [`BeatSpec`] into a silent mono buffer with a short full-scale
//! burst at the start of every beat.

use tracing::debug;

use crate::beat::BeatSpec;

/// Output sample rate in Hz.
pub const SAMPLE_RATE: u32 = 44_100;

/// Length of one click in samples.
pub const CLICK_LENGTH_SAMPLES: usize = 10;

/// Sample value written for the duration of a click.
pub const CLICK_AMPLITUDE: i16 = 30_000;

/// Mono 16-bit sample buffer holding a rendered click track.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PcmBuffer {
    samples: Vec<i16>,
    click_offsets: Vec<usize>,
    clicks_placed: u64,
    clicks_dropped: u64,
}

impl PcmBuffer {
    /// Creates a silent buffer of `len` samples.
    pub fn silent(len: usize) -> Self {
        Self {
            samples: vec![0; len],
            click_offsets: Vec::new(),
            clicks_placed: 0,
            clicks_dropped: 0,
        }
    }

    /// Places `count` coinciding clicks at `start`.
    ///
    /// The click is written once. Returns false, leaving the samples untouched
    /// and counting all `count` clicks as dropped, when the click would run past
    /// the end of the buffer.
    pub fn place_clicks(&mut self, start: usize, count: u64) -> bool {
        let end = match start.checked_add(CLICK_LENGTH_SAMPLES) {
            Some(end) if end <= self.samples.len() => end,
            _ => {
                self.clicks_dropped += count;
                return false;
            }
        };
        self.samples[start..end].fill(CLICK_AMPLITUDE);
        if self.click_offsets.last() != Some(&start) {
            self.click_offsets.push(start);
        }
        self.clicks_placed += count;
        true
    }

    /// All samples in order.
    pub fn samples(&self) -> &[i16] {
        &self.samples
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Returns true if the buffer holds no samples.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Distinct start offsets of the clicks that were placed, in order.
    pub fn click_offsets(&self) -> &[usize] {
        &self.click_offsets
    }

    /// Number of clicks placed, counting coinciding clicks separately.
    pub fn clicks_placed(&self) -> u64 {
        self.clicks_placed
    }

    /// Number of clicks dropped because they would overrun the buffer.
    pub fn clicks_dropped(&self) -> u64 {
        self.clicks_dropped
    }

    /// Buffer length in seconds.
    pub fn duration_seconds(&self) -> f64 {
        self.samples.len() as f64 / SAMPLE_RATE as f64
    }
}

/// Renders the click track described by `spec`.
///
/// The buffer is `round(total_duration * SAMPLE_RATE)` samples long. Beat `i`
/// starts at `round(i * effective_beat_duration * SAMPLE_RATE)`; beats whose
/// click would not fit entirely inside the buffer are dropped.
///
/// Work is bounded by the buffer length, not the beat count: beats sharing a
/// start sample are written once.
pub fn render(spec: &BeatSpec) -> PcmBuffer {
    let sample_rate = SAMPLE_RATE as f64;
    let num_samples = (spec.total_duration() * sample_rate).round() as usize;
    let effective = spec.effective_beat_duration();
    let num_beats = spec.num_beats();
    let start_of = |i: u64| (i as f64 * effective * sample_rate).round() as usize;

    let mut buffer = PcmBuffer::silent(num_samples);

    // Starts never decrease with `i`, so the beats that fit are a prefix.
    let fitting = match num_samples.checked_sub(CLICK_LENGTH_SAMPLES) {
        Some(last_start) => partition_point(0, num_beats, |i| start_of(i) <= last_start),
        None => 0,
    };

    let mut i = 0;
    while i < fitting {
        let start = start_of(i);
        let next = if i + 1 == fitting || start_of(i + 1) > start {
            i + 1
        } else {
            partition_point(i + 1, fitting, |j| start_of(j) == start)
        };
        buffer.place_clicks(start, next - i);
        i = next;
    }
    buffer.clicks_dropped += num_beats - fitting;

    debug!(
        num_samples,
        beats = num_beats,
        placed = buffer.clicks_placed(),
        dropped = buffer.clicks_dropped(),
        "rendered click track"
    );

    buffer
}

/// First index in `lo..hi` where `pred` is false; `pred` must be true on a
/// prefix of the range and false after it.
fn partition_point(mut lo: u64, mut hi: u64, pred: impl Fn(u64) -> bool) -> u64 {
    while lo < hi {
        let mid = lo + (hi - lo) / 2;
        if pred(mid) {
            lo = mid + 1;
        } else {
            hi = mid;
        }
    }
    lo
}

/// Finds the start offset of every run of non-silent samples.
///
/// Used to read click positions back out of a decoded track.
pub fn find_click_onsets(samples: &[i16]) -> Vec<usize> {
    let mut onsets = Vec::new();
    let mut in_click = false;
    for (i, &sample) in samples.iter().enumerate() {
        let loud = sample != 0;
        if loud && !in_click {
            onsets.push(i);
        }
        in_click = loud;
    }
    onsets
}
