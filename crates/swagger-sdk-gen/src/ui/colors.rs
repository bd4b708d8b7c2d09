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

/// Semantic roles for terminal output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
  Timestamp,
  Primary,
  Accent,
  Info,
  Success,
  Label,
  Value,
}

impl Theme {
  const fn rgb(self, role: Role) -> (u8, u8, u8) {
    match (self, role) {
      (Self::Dark, Role::Timestamp | Role::Info | Role::Success) => (118, 166, 166),
      (Self::Dark, Role::Primary) => (191, 126, 4),
      (Self::Dark, Role::Accent) => (166, 84, 55),
      (Self::Dark, Role::Label) => (217, 164, 4),
      (Self::Dark, Role::Value) => (242, 211, 56),
      (Self::Light, Role::Timestamp) => (92, 62, 38),
      (Self::Light, Role::Primary) => (70, 42, 25),
      (Self::Light, Role::Accent) => (211, 99, 70),
      (Self::Light, Role::Info) => (40, 111, 170),
      (Self::Light, Role::Success) => (34, 142, 90),
      (Self::Light, Role::Label) => (176, 103, 66),
      (Self::Light, Role::Value) => (199, 146, 76),
    }
  }
}

pub struct Colors {
  enabled: bool,
  theme: Theme,
}

impl Colors {
  pub const fn new(enabled: bool, theme: Theme) -> Self {
    Self { enabled, theme }
  }

  pub const fn role(&self, role: Role) -> Color {
    if !self.enabled {
      return Color::Reset;
    }
    let (r, g, b) = self.theme.rgb(role);
    Color::Rgb { r, g, b }
  }

  pub const fn timestamp(&self) -> Color {
    self.role(Role::Timestamp)
  }

  pub const fn primary(&self) -> Color {
    self.role(Role::Primary)
  }

  pub const fn accent(&self) -> Color {
    self.role(Role::Accent)
  }

  pub const fn info(&self) -> Color {
    self.role(Role::Info)
  }

  pub const fn success(&self) -> Color {
    self.role(Role::Success)
  }

  pub const fn label(&self) -> Color {
    self.role(Role::Label)
  }

  pub const fn value(&self) -> Color {
    self.role(Role::Value)
  }

  /// The same role as a `comfy-table` cell color.
  pub const fn cell(&self, role: Role) -> ComfyColor {
    if !self.enabled {
      return ComfyColor::Reset;
    }
    let (r, g, b) = self.theme.rgb(role);
    ComfyColor::Rgb { r, g, b }
  }

  pub const fn clap_styles() -> Styles {
    const fn fg(role: Role) -> Option<ClapColor> {
      let (r, g, b) = Theme::Dark.rgb(role);
      Some(ClapColor::Rgb(RgbColor(r, g, b)))
    }

    Styles::styled()
      .header(Style::new().bold().underline().fg_color(fg(Role::Label)))
      .usage(Style::new().bold().fg_color(fg(Role::Label)))
      .literal(Style::new().fg_color(fg(Role::Success)))
      .placeholder(Style::new().fg_color(fg(Role::Info)))
      .error(Style::new().bold().fg_color(Some(ClapColor::Ansi(AnsiColor::Red))))
      .valid(Style::new().fg_color(fg(Role::Success)))
      .invalid(Style::new().bold().fg_color(fg(Role::Accent)))
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
    ThemeMode::Auto => std::env::var("COLORFGBG")
      .ok()
      .as_deref()
      .and_then(theme_from_colorfgbg)
      .unwrap_or(Theme::Dark),
  }
}

/// `COLORFGBG` is `fg;bg`; background indices 8 and above are light.
fn theme_from_colorfgbg(value: &str) -> Option<Theme> {
  let background = value.split(';').next_back()?.parse::<u8>().ok()?;
  Some(if background >= 8 { Theme::Light } else { Theme::Dark })
}
