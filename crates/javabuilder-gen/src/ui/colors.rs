use std::io::IsTerminal;

use clap::{
  ValueEnum,
  builder::styling::{AnsiColor, Color as ClapColor, RgbColor, Style, Styles},
};
use comfy_table::Color as ComfyColor;
use crossterm::style::Color;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ColorMode {
  Always,
  Auto,
  Never,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ThemeMode {
  Dark,
  Light,
  Auto,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
  Dark,
  Light,
}

/// Palette for terminal output. Every accessor yields [`Color::Reset`] when
/// colors are disabled.
#[derive(Debug, Clone, Copy)]
pub struct Colors {
  enabled: bool,
  theme: Theme,
}

pub trait IntoComfyColor {
  fn into(self) -> ComfyColor;
}

impl IntoComfyColor for Color {
  fn into(self) -> ComfyColor {
    match self {
      Color::Rgb { r, g, b } => ComfyColor::Rgb { r, g, b },
      Color::AnsiValue(val) => ComfyColor::AnsiValue(val),
      Color::Black => ComfyColor::Black,
      Color::DarkGrey => ComfyColor::DarkGrey,
      Color::Grey => ComfyColor::Grey,
      Color::White => ComfyColor::White,
      Color::Red => ComfyColor::Red,
      Color::DarkRed => ComfyColor::DarkRed,
      Color::Green => ComfyColor::Green,
      Color::DarkGreen => ComfyColor::DarkGreen,
      Color::Yellow => ComfyColor::Yellow,
      Color::DarkYellow => ComfyColor::DarkYellow,
      Color::Blue => ComfyColor::Blue,
      Color::DarkBlue => ComfyColor::DarkBlue,
      Color::Magenta => ComfyColor::Magenta,
      Color::DarkMagenta => ComfyColor::DarkMagenta,
      Color::Cyan => ComfyColor::Cyan,
      Color::DarkCyan => ComfyColor::DarkCyan,
      Color::Reset => ComfyColor::Reset,
    }
  }
}

impl Colors {
  pub const fn new(enabled: bool, theme: Theme) -> Self {
    Self { enabled, theme }
  }

  const fn pick(&self, dark: (u8, u8, u8), light: (u8, u8, u8)) -> Color {
    if !self.enabled {
      return Color::Reset;
    }
    let (r, g, b) = match self.theme {
      Theme::Dark => dark,
      Theme::Light => light,
    };
    Color::Rgb { r, g, b }
  }

  pub const fn timestamp(&self) -> Color {
    self.pick((128, 150, 170), (88, 96, 105))
  }

  pub const fn primary(&self) -> Color {
    self.pick((222, 170, 110), (110, 70, 35))
  }

  pub const fn accent(&self) -> Color {
    self.pick((232, 112, 76), (190, 74, 48))
  }

  pub const fn info(&self) -> Color {
    self.pick((110, 170, 210), (36, 100, 160))
  }

  pub const fn success(&self) -> Color {
    self.pick((120, 190, 130), (30, 130, 70))
  }

  pub const fn label(&self) -> Color {
    self.pick((240, 190, 90), (160, 100, 40))
  }

  pub const fn value(&self) -> Color {
    self.pick((245, 225, 160), (120, 90, 50))
  }

  /// Dimmed text for secondary details such as untracked properties.
  pub const fn muted(&self) -> Color {
    self.pick((120, 120, 120), (140, 140, 140))
  }

  const fn to_clap(color: Color) -> Option<ClapColor> {
    match color {
      Color::Rgb { r, g, b } => Some(ClapColor::Rgb(RgbColor(r, g, b))),
      Color::Red | Color::DarkRed => Some(ClapColor::Ansi(AnsiColor::Red)),
      Color::Green | Color::DarkGreen => Some(ClapColor::Ansi(AnsiColor::Green)),
      Color::Yellow | Color::DarkYellow => Some(ClapColor::Ansi(AnsiColor::Yellow)),
      Color::Blue | Color::DarkBlue => Some(ClapColor::Ansi(AnsiColor::Blue)),
      Color::Cyan | Color::DarkCyan => Some(ClapColor::Ansi(AnsiColor::Cyan)),
      Color::Magenta | Color::DarkMagenta => Some(ClapColor::Ansi(AnsiColor::Magenta)),
      Color::Grey | Color::DarkGrey => Some(ClapColor::Ansi(AnsiColor::BrightBlack)),
      Color::Black => Some(ClapColor::Ansi(AnsiColor::Black)),
      Color::White => Some(ClapColor::Ansi(AnsiColor::White)),
      Color::AnsiValue(_) | Color::Reset => None,
    }
  }

  /// Help output styling; always uses the dark palette.
  pub const fn clap_styles() -> Styles {
    let colors = Self::new(true, Theme::Dark);

    Styles::styled()
      .header(Style::new().bold().underline().fg_color(Self::to_clap(colors.label())))
      .usage(Style::new().bold().fg_color(Self::to_clap(colors.label())))
      .literal(Style::new().fg_color(Self::to_clap(colors.primary())))
      .placeholder(Style::new().fg_color(Self::to_clap(colors.info())))
      .error(Style::new().bold().fg_color(Self::to_clap(colors.accent())))
      .valid(Style::new().fg_color(Self::to_clap(colors.success())))
      .invalid(Style::new().bold().fg_color(Self::to_clap(colors.accent())))
  }
}

pub fn colors_enabled(mode: ColorMode) -> bool {
  match mode {
    ColorMode::Always => true,
    ColorMode::Never => false,
    ColorMode::Auto => std::io::stdout().is_terminal() && std::env::var_os("NO_COLOR").is_none(),
  }
}

pub fn detect_theme(mode: ThemeMode) -> Theme {
  match mode {
    ThemeMode::Dark => Theme::Dark,
    ThemeMode::Light => Theme::Light,
    ThemeMode::Auto => theme_from_colorfgbg(std::env::var("COLORFGBG").ok().as_deref()).unwrap_or(Theme::Dark),
  }
}

/// `COLORFGBG` is `fg;bg` (sometimes `fg;default;bg`); background indices 7 and up are light.
fn theme_from_colorfgbg(value: Option<&str>) -> Option<Theme> {
  let background = value?.rsplit(';').next()?.parse::<u8>().ok()?;
  Some(if background >= 7 && background != 8 {
    Theme::Light
  } else {
    Theme::Dark
  })
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn disabled_colors_reset_every_role() {
    let colors = Colors::new(false, Theme::Light);
    for color in [
      colors.timestamp(),
      colors.primary(),
      colors.accent(),
      colors.info(),
      colors.success(),
      colors.label(),
      colors.value(),
      colors.muted(),
    ] {
      assert_eq!(color, Color::Reset);
    }
  }

  #[test]
  fn explicit_modes_ignore_environment() {
    assert!(colors_enabled(ColorMode::Always));
    assert!(!colors_enabled(ColorMode::Never));
    assert_eq!(detect_theme(ThemeMode::Light), Theme::Light);
    assert_eq!(detect_theme(ThemeMode::Dark), Theme::Dark);
  }

  #[test]
  fn colorfgbg_background_selects_theme() {
    assert_eq!(theme_from_colorfgbg(Some("0;15")), Some(Theme::Light));
    assert_eq!(theme_from_colorfgbg(Some("15;0")), Some(Theme::Dark));
    assert_eq!(theme_from_colorfgbg(Some("15;default;8")), Some(Theme::Dark));
    assert_eq!(theme_from_colorfgbg(Some("garbage")), None);
    assert_eq!(theme_from_colorfgbg(None), None);
  }

  #[test]
  fn comfy_conversion_keeps_rgb_components() {
    let color = IntoComfyColor::into(Color::Rgb { r: 1, g: 2, b: 3 });
    assert_eq!(color, ComfyColor::Rgb { r: 1, g: 2, b: 3 });
  }
}
