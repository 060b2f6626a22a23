//! Host preview of the matrix in a truecolor terminal.
//!
//! Arrow keys tilt the virtual board, `s` jerks it (shake burst), space is
//! the user button, `v` toggles between liquid and animations, `c` levels
//! the board, `r` pours the boot text again, digits jump straight to an
//! animation mode and `q` quits. Audio is synthesized: a slow sweep across the
//! bands with a beat every half second.

use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEventKind},
    execute, queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen},
};
use liquid_matrix::{
    AudioFeatures, BAND_COUNT, Frame, FrameClock, MATRIX_HEIGHT, MATRIX_WIDTH, Player, Srgb, Tilt,
    feed::{AudioFeed, TiltFeed},
};
use rand::{Rng, SeedableRng, rngs::SmallRng};
use std::io::{self, Stdout, Write};
use std::time::{Duration, Instant};

const FPS_CAP: u64 = 30;
const TILT_STEP: f32 = 5.0;
const BEAT_PERIOD_MS: u128 = 500;

/// LEDs are capped far below full scale; stretch them so the preview is visible.
const PREVIEW_GAIN: u16 = 4;

static TILT: TiltFeed = TiltFeed::new(Tilt::LEVEL);
static AUDIO: AudioFeed = AudioFeed::new(AudioFeatures::SILENT);

struct Synth {
    rng: SmallRng,
    last_beat: u128,
}

impl Synth {
    fn new() -> Self {
        Self {
            rng: SmallRng::seed_from_u64(0x5EED),
            last_beat: 0,
        }
    }

    fn sample(&mut self, elapsed: Duration) -> AudioFeatures {
        let t = elapsed.as_secs_f32();
        let peak = (t * 0.4).sin() * 0.5 + 0.5;
        let mut bands = [0u8; BAND_COUNT];
        for (i, band) in bands.iter_mut().enumerate() {
            let pos = i as f32 / BAND_COUNT as f32;
            let energy = 1.0 - ((pos - peak).abs() * 3.0).min(1.0);
            let noise: f32 = self.rng.gen_range(0.0..40.0);
            *band = (energy * 215.0 + noise).min(255.0) as u8;
        }

        let ms = elapsed.as_millis();
        let beat = ms - self.last_beat >= BEAT_PERIOD_MS;
        if beat {
            self.last_beat = ms;
        }
        let mut audio = AudioFeatures::from_bands(bands, beat);
        if beat {
            audio.bass = 235;
        }
        audio
    }
}

fn preview(color: Srgb<u8>) -> Color {
    let gain = |c: u8| (u16::from(c) * PREVIEW_GAIN).min(255) as u8;
    Color::Rgb {
        r: gain(color.red),
        g: gain(color.green),
        b: gain(color.blue),
    }
}

fn render(stdout: &mut Stdout, frame: &Frame, player: &Player, tilt: Tilt) -> io::Result<()> {
    queue!(stdout, cursor::MoveTo(0, 0))?;
    for y in 0..frame.height() as i32 {
        for x in 0..frame.width() as i32 {
            queue!(stdout, SetBackgroundColor(preview(frame.get(x, y))), Print("  "))?;
        }
        queue!(stdout, ResetColor, Print("\r\n"))?;
    }
    queue!(
        stdout,
        Clear(ClearType::CurrentLine),
        SetForegroundColor(Color::Grey),
        Print(format!(
            "{:<14} roll {:>4.0}  pitch {:>4.0}   [arrows] tilt [s] shake [space] button [v] view [r] refill [0-9] mode [q] quit",
            player.status(),
            tilt.roll,
            tilt.pitch
        )),
        ResetColor
    )?;
    Ok(())
}

/// Returns `true` when the user asked to quit.
fn handle_key(code: KeyCode, player: &mut Player) -> bool {
    let tilt = TILT.get();
    let nudge = |roll: f32, pitch: f32| {
        TILT.publish(Tilt::new(
            (tilt.roll + roll).clamp(-90.0, 90.0),
            (tilt.pitch + pitch).clamp(-90.0, 90.0),
        ));
    };
    match code {
        KeyCode::Char('q') | KeyCode::Esc => return true,
        KeyCode::Char(' ') => player.button_pressed(),
        KeyCode::Char('v') => player.toggle_view(),
        KeyCode::Char('c') => TILT.publish(Tilt::LEVEL),
        KeyCode::Char('r') => player.liquid_mut().reset(),
        KeyCode::Char(d @ '0'..='9') => {
            let index = d as u8 - b'0';
            // Out-of-range indices are logged and ignored by the animator.
            let _ = player.animator_mut().set_mode_index(index);
        }
        KeyCode::Char('s') => nudge(if tilt.roll > 0.0 { -35.0 } else { 35.0 }, 0.0),
        KeyCode::Left => nudge(-TILT_STEP, 0.0),
        KeyCode::Right => nudge(TILT_STEP, 0.0),
        KeyCode::Up => nudge(0.0, -TILT_STEP),
        KeyCode::Down => nudge(0.0, TILT_STEP),
        _ => {}
    }
    false
}

fn main() -> io::Result<()> {
    let mut player = Player::new(MATRIX_WIDTH, MATRIX_HEIGHT, 0xC0FFEE).map_err(io::Error::other)?;
    let mut frame = Frame::new(MATRIX_WIDTH, MATRIX_HEIGHT).map_err(io::Error::other)?;
    let mut clock = FrameClock::new();
    let mut synth = Synth::new();

    let mut stdout = io::stdout();
    terminal::enable_raw_mode()?;
    execute!(stdout, EnterAlternateScreen, cursor::Hide)?;
    execute!(stdout, Clear(ClearType::All), cursor::MoveTo(0, 0))?;

    let start = Instant::now();
    let target_frame = Duration::from_millis(1000 / FPS_CAP);

    'outer: loop {
        while event::poll(Duration::from_millis(0))? {
            if let Event::Key(k) = event::read()? {
                if k.kind == KeyEventKind::Press && handle_key(k.code, &mut player) {
                    break 'outer;
                }
            }
        }

        let elapsed = start.elapsed();
        AUDIO.publish(synth.sample(elapsed));

        let now = embassy_time::Instant::from_micros(elapsed.as_micros() as u64);
        let dt = clock.tick(now);
        let tilt = TILT.get();
        player.render(&mut frame, tilt, &AUDIO.get(), dt);

        render(&mut stdout, &frame, &player, tilt)?;
        stdout.flush()?;

        std::thread::sleep(target_frame);
    }

    execute!(stdout, ResetColor, cursor::Show, LeaveAlternateScreen)?;
    terminal::disable_raw_mode()?;
    Ok(())
}
