/// Sound layer: three synthesized cues played through rodio.
///
/// Cues are rendered offline with fundsp into mono f32 buffers, then queued
/// on sinks.  Happy and sad are fire-and-forget; the winning fanfare keeps
/// its sink so the game loop can ask whether it is still sounding.

use fundsp::hacker32 as dsp;
use rodio::{buffer::SamplesBuffer, OutputStream, OutputStreamHandle, Sink};

use fruit_catcher::entities::SoundCue;

const SAMPLE_RATE: u32 = 44_100;

pub struct Audio {
    _stream: OutputStream,
    handle: OutputStreamHandle,
    /// Sink of the currently (or last) playing winning fanfare.
    winning: Option<Sink>,
}

impl Audio {
    /// Open the default output device.  Callers treat failure as "no sound":
    /// the game stays playable either way.
    pub fn new() -> Result<Self, rodio::StreamError> {
        let (stream, handle) = OutputStream::try_default()?;
        Ok(Self {
            _stream: stream,
            handle,
            winning: None,
        })
    }

    pub fn play(&mut self, cue: SoundCue) {
        match cue {
            SoundCue::Happy => self.play_detached(happy_samples()),
            SoundCue::Sad => self.play_detached(sad_samples()),
            SoundCue::Winning => {
                if let Ok(sink) = Sink::try_new(&self.handle) {
                    sink.append(SamplesBuffer::new(1, SAMPLE_RATE, winning_samples()));
                    self.winning = Some(sink);
                }
            }
        }
    }

    /// True while the winning fanfare is still sounding.
    pub fn winning_active(&self) -> bool {
        self.winning.as_ref().map(|s| !s.empty()).unwrap_or(false)
    }

    fn play_detached(&self, samples: Vec<f32>) {
        if let Ok(sink) = Sink::try_new(&self.handle) {
            sink.append(SamplesBuffer::new(1, SAMPLE_RATE, samples));
            sink.detach();
        }
    }
}

// ── Cue synthesis ─────────────────────────────────────────────────────────────

/// Short rising chirp for a catch.
fn happy_samples() -> Vec<f32> {
    let duration = 0.15;
    let mut node = (dsp::lfo(|t: f32| dsp::xerp(500.0, 950.0, (t / 0.1).min(1.0))) >> dsp::sine())
        * dsp::lfo(|t: f32| dsp::xerp(0.2, 0.001, (t / 0.15).min(1.0)));
    render_mono(&mut node, SAMPLE_RATE, duration)
}

/// Drooping buzz for a lost fruit.
fn sad_samples() -> Vec<f32> {
    let duration = 0.35;
    let mut node = (dsp::lfo(|t: f32| dsp::lerp(320.0, 110.0, (t / 0.3).min(1.0))) >> dsp::saw())
        * dsp::lfo(|t: f32| dsp::lerp(0.12, 0.0, (t / 0.35).min(1.0)));
    render_mono(&mut node, SAMPLE_RATE, duration)
}

/// Ascending fanfare, just under two seconds.  `WINNING_CUE_FRAMES` in
/// `main` mirrors this length for machines with no audio device.
fn winning_samples() -> Vec<f32> {
    const NOTES: [f32; 8] = [
        523.25, 659.25, 783.99, 1046.50, 783.99, 1046.50, 1318.51, 1567.98,
    ];
    let note_gap = 0.22f32;
    let note_len = 0.45f32;
    let total_duration = note_gap * (NOTES.len() as f32 - 1.0) + note_len;
    let total_samples = (SAMPLE_RATE as f32 * total_duration) as usize;
    let mut samples = vec![0.0f32; total_samples];

    for (idx, freq) in NOTES.iter().enumerate() {
        let start = (note_gap * idx as f32 * SAMPLE_RATE as f32) as usize;
        let mut node = dsp::sine_hz(*freq)
            * dsp::lfo(|t: f32| dsp::xerp(0.12, 0.001, (t / note_len).min(1.0)));
        let tone = render_mono(&mut node, SAMPLE_RATE, note_len);
        for (i, s) in tone.into_iter().enumerate() {
            let target = start + i;
            if target < total_samples {
                samples[target] += s;
            }
        }
    }

    samples
}

fn render_mono(node: &mut dyn dsp::AudioUnit, sample_rate: u32, duration: f32) -> Vec<f32> {
    node.set_sample_rate(sample_rate as f64);
    node.reset();

    let sample_count = (sample_rate as f32 * duration) as usize;
    let mut samples = Vec::with_capacity(sample_count);
    for _ in 0..sample_count {
        samples.push(node.get_mono());
    }
    samples
}
