//! Appearance settings handlers.

use serde::Serialize;
use tetherly_core::{
    AnimationSpeed, Command as CoreCommand, Controller, CornerStyle, Theme, UiSettings,
    UiSettingsPatch,
};

use crate::cli::{AnimationSpeedArg, CornerStyleArg, GlobalOpts, ThemeArg, UiArgs, UiCommand};
use crate::error::CliError;
use crate::output;

use super::util;

/// Stored settings plus the values a front end renders with.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct UiView<'a> {
    #[serde(flatten)]
    settings: &'a UiSettings,
    accent_color: &'static str,
    background_color: &'static str,
    animation_duration_ms: u32,
    corner_radius: u32,
}

impl<'a> From<&'a UiSettings> for UiView<'a> {
    fn from(settings: &'a UiSettings) -> Self {
        Self {
            settings,
            accent_color: settings.accent_color(),
            background_color: settings.background_color(),
            animation_duration_ms: settings.animation_duration_ms(),
            corner_radius: settings.corner_radius(),
        }
    }
}

fn detail(view: &UiView<'_>, color: bool) -> String {
    let s = view.settings;
    [
        format!(
            "Theme:           {} {}",
            s.theme,
            output::paint("■", view.accent_color, color)
        ),
        format!("Accent:          {}", view.accent_color),
        format!("Background:      {}", view.background_color),
        format!(
            "Animation:       {} ({}ms)",
            s.animation_speed, view.animation_duration_ms
        ),
        format!("Corners:         {} ({}px)", s.corner_style, view.corner_radius),
        format!("Animations:      {}", util::yes_no(s.show_animations)),
        format!("Haptics:         {}", util::yes_no(s.enable_haptics)),
        format!("Reduce motion:   {}", util::yes_no(s.reduce_motion)),
    ]
    .join("\n")
}

fn theme(arg: ThemeArg) -> Theme {
    match arg {
        ThemeArg::Default => Theme::Default,
        ThemeArg::Ocean => Theme::Ocean,
        ThemeArg::Forest => Theme::Forest,
        ThemeArg::Sunset => Theme::Sunset,
        ThemeArg::Purple => Theme::Purple,
        ThemeArg::Minimal => Theme::Minimal,
    }
}

fn animation_speed(arg: AnimationSpeedArg) -> AnimationSpeed {
    match arg {
        AnimationSpeedArg::Slow => AnimationSpeed::Slow,
        AnimationSpeedArg::Normal => AnimationSpeed::Normal,
        AnimationSpeedArg::Fast => AnimationSpeed::Fast,
        AnimationSpeedArg::Instant => AnimationSpeed::Instant,
    }
}

fn corner_style(arg: CornerStyleArg) -> CornerStyle {
    match arg {
        CornerStyleArg::None => CornerStyle::None,
        CornerStyleArg::Small => CornerStyle::Small,
        CornerStyleArg::Medium => CornerStyle::Medium,
        CornerStyleArg::Large => CornerStyle::Large,
        CornerStyleArg::Full => CornerStyle::Full,
    }
}

pub fn handle(controller: &mut Controller, args: UiArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        UiCommand::Show => {
            let view = UiView::from(controller.store().ui_settings());
            let color = output::should_color(global.color_mode());
            let out = output::render_single(
                global.output_format(),
                &view,
                |v| detail(v, color),
                |v| v.settings.theme.to_string(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        UiCommand::Set {
            theme: theme_arg,
            animation_speed: speed_arg,
            corner_style: corner_arg,
            show_animations,
            haptics,
            reduce_motion,
        } => {
            let patch = UiSettingsPatch {
                theme: theme_arg.map(theme),
                animation_speed: speed_arg.map(animation_speed),
                corner_style: corner_arg.map(corner_style),
                show_animations,
                enable_haptics: haptics,
                reduce_motion,
            };
            if patch.is_empty() {
                return Err(CliError::Validation {
                    field: "ui set".into(),
                    reason: "pass at least one setting to change".into(),
                });
            }
            controller.execute(CoreCommand::UpdateUiSettings(patch))?;
            output::notice("Appearance updated", global.quiet);
            Ok(())
        }

        UiCommand::Reset => {
            controller.execute(CoreCommand::ResetUiSettings)?;
            output::notice("Appearance reset to defaults", global.quiet);
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn view_exposes_derived_render_values() {
        let settings = UiSettings {
            theme: Theme::Ocean,
            reduce_motion: true,
            ..UiSettings::default()
        };
        let json = serde_json::to_value(UiView::from(&settings)).unwrap_or_default();
        assert_eq!(json["theme"], "ocean");
        assert_eq!(json["accentColor"], "#3B82F6");
        assert_eq!(json["animationDurationMs"], 0);
        assert_eq!(json["cornerRadius"], 16);
    }
}
