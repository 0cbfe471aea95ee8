use crate::config::AnimationConfig;
use crate::logos::{AnimatedLogo, BadgeState, EyePosition};
use crate::render::layout;
use crossterm::cursor::{Hide, MoveUp, Show};
use crossterm::style::Print;
use crossterm::terminal::{Clear, ClearType};
use crossterm::{execute, queue};
use std::io::{self, Write};
use std::thread;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame {
    pub eyes: EyePosition,
    pub badge: BadgeState,
}

/// Frame order: every eye position bounces the badge `bounce_cycles` times,
/// then `end_bounce_cycles` more bounces while looking right.
pub fn schedule(cfg: &AnimationConfig) -> Vec<Frame> {
    let bounce = |eyes: EyePosition| {
        [BadgeState::Up, BadgeState::Down]
            .into_iter()
            .map(move |badge| Frame { eyes, badge })
    };

    let mut frames = Vec::new();
    for eyes in EyePosition::ALL {
        for _ in 0..cfg.bounce_cycles {
            frames.extend(bounce(eyes));
        }
    }
    for _ in 0..cfg.end_bounce_cycles {
        frames.extend(bounce(EyePosition::Right));
    }
    frames
}

/// Hides the terminal cursor for as long as it lives.
pub struct HiddenCursor<'a, W: Write> {
    out: &'a mut W,
}

impl<'a, W: Write> HiddenCursor<'a, W> {
    pub fn hide(out: &'a mut W) -> io::Result<Self> {
        execute!(out, Hide)?;
        Ok(Self { out })
    }
}

impl<W: Write> Write for HiddenCursor<'_, W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.out.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }
}

impl<W: Write> Drop for HiddenCursor<'_, W> {
    fn drop(&mut self) {
        if let Err(err) = execute!(self.out, Show) {
            warn!(error = %err, "failed to restore cursor visibility");
        }
    }
}

/// Plays the animation in place and returns the number of frames drawn.
/// The cursor is shown again however drawing ends.
pub fn play<W: Write>(
    out: &mut W,
    logo: &AnimatedLogo,
    info: &[String],
    column: usize,
    cfg: &AnimationConfig,
) -> io::Result<usize> {
    let frames = schedule(cfg);
    let height = logo.frame_height().max(info.len());
    debug!(frames = frames.len(), height, "starting animation");

    let mut screen = HiddenCursor::hide(out)?;
    writeln!(screen)?;

    let mut drawn = 0;
    for (i, frame) in frames.iter().enumerate() {
        if i > 0 {
            queue!(screen, MoveUp(height as u16))?;
        }
        let lines = logo.frame(frame.eyes, frame.badge);
        for row in layout(&lines, info) {
            queue!(
                screen,
                Clear(ClearType::CurrentLine),
                Print(row.render(column)),
                Print("\n")
            )?;
        }
        screen.flush()?;
        drawn += 1;

        if i + 1 < frames.len() && !cfg.bounce_delay.is_zero() {
            thread::sleep(cfg.bounce_delay);
        }
    }

    writeln!(screen)?;
    screen.flush()?;
    Ok(drawn)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logos::{LogoRegistry, LogoStyle};
    use crate::theme::Palette;
    use std::time::Duration;

    const HIDE: &str = "\u{1b}[?25l";
    const SHOW: &str = "\u{1b}[?25h";
    const CLEAR_LINE: &str = "\u{1b}[2K";

    fn fast() -> AnimationConfig {
        AnimationConfig {
            bounce_delay: Duration::ZERO,
            ..AnimationConfig::default()
        }
    }

    fn animated_logo() -> AnimatedLogo {
        match LogoRegistry::new(Palette::new(false)).resolve("animated") {
            LogoStyle::Animated(logo) => logo.clone(),
            LogoStyle::Static(_) => panic!("animated style must be animated"),
        }
    }

    fn info() -> Vec<String> {
        (0..5).map(|i| format!("fact {i}")).collect()
    }

    /// Accepts every write but fails every flush after the first `flushes_ok`.
    struct FailingFlush {
        buf: Vec<u8>,
        flushes_ok: usize,
    }

    impl Write for FailingFlush {
        fn write(&mut self, data: &[u8]) -> io::Result<usize> {
            self.buf.extend_from_slice(data);
            Ok(data.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            if self.flushes_ok == 0 {
                return Err(io::Error::new(io::ErrorKind::BrokenPipe, "terminal gone"));
            }
            self.flushes_ok -= 1;
            Ok(())
        }
    }

    #[test]
    fn default_schedule_has_twenty_eight_frames() {
        let frames = schedule(&AnimationConfig::default());
        assert_eq!(frames.len(), 3 * 4 * 2 + 2 * 2);

        assert_eq!(
            frames[0],
            Frame {
                eyes: EyePosition::Left,
                badge: BadgeState::Up
            }
        );
        assert_eq!(frames[8].eyes, EyePosition::Center);
        assert_eq!(frames[16].eyes, EyePosition::Right);
        assert!(frames[24..].iter().all(|f| f.eyes == EyePosition::Right));
        for pair in frames.chunks(2) {
            assert_eq!(pair[0].badge, BadgeState::Up);
            assert_eq!(pair[1].badge, BadgeState::Down);
        }
    }

    #[test]
    fn schedule_follows_configured_cycles() {
        let cfg = AnimationConfig {
            bounce_cycles: 1,
            end_bounce_cycles: 0,
            bounce_delay: Duration::ZERO,
        };
        assert_eq!(schedule(&cfg).len(), 6);
    }

    #[test]
    fn play_redraws_each_frame_in_place() {
        let logo = animated_logo();
        let mut out = Vec::new();
        let drawn = play(&mut out, &logo, &info(), 32, &fast()).expect("write to vec");
        assert_eq!(drawn, 28);

        let text = String::from_utf8(out).expect("utf8");
        assert_eq!(text.matches(HIDE).count(), 1);
        assert_eq!(text.matches(SHOW).count(), 1);
        assert!(text.find(HIDE) < text.find(CLEAR_LINE));
        assert!(text.rfind(SHOW) > text.rfind(CLEAR_LINE));
        assert_eq!(text.matches("\u{1b}[12A").count(), 27);
        assert_eq!(text.matches(CLEAR_LINE).count(), 28 * 12);
        assert_eq!(text.matches("fact 4").count(), 28);
    }

    #[test]
    fn long_fact_list_grows_the_frame() {
        let logo = animated_logo();
        let info: Vec<String> = (0..14).map(|i| format!("fact {i}")).collect();
        let mut out = Vec::new();
        play(&mut out, &logo, &info, 32, &fast()).expect("write to vec");

        let text = String::from_utf8(out).expect("utf8");
        assert_eq!(text.matches("\u{1b}[14A").count(), 27);
        assert_eq!(text.matches("fact 13").count(), 28);
    }

    #[test]
    fn cursor_is_restored_when_drawing_fails() {
        let logo = animated_logo();
        let mut out = FailingFlush {
            buf: Vec::new(),
            flushes_ok: 4,
        };
        let err = play(&mut out, &logo, &info(), 32, &fast()).expect_err("flush fails");
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);

        let text = String::from_utf8(out.buf).expect("utf8");
        assert_eq!(text.matches(HIDE).count(), 1);
        assert_eq!(text.matches(SHOW).count(), 1);
        assert!(text.matches(CLEAR_LINE).count() < 28 * 12);
    }
}
