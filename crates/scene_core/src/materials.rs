use bevy::prelude::*;
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

/// Fixed appearance presets used across the demos.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SurfacePreset {
    /// Plain lit surface in the tint colour.
    #[default]
    Standard,
    /// Tint colour that also emits itself.
    Emissive,
    /// Translucent, slightly metallic blue glass (tint overrides the blue).
    Glass,
    Gold,
    /// White body with a green glow.
    Glow,
    /// Orange body with a red-orange emissive channel.
    Ember,
    /// Semi-transparent green metal used by the model viewer.
    Alternative,
}

impl SurfacePreset {
    pub const ALL: [SurfacePreset; 7] = [
        SurfacePreset::Standard,
        SurfacePreset::Emissive,
        SurfacePreset::Glass,
        SurfacePreset::Gold,
        SurfacePreset::Glow,
        SurfacePreset::Ember,
        SurfacePreset::Alternative,
    ];

    pub fn label(self) -> &'static str {
        match self {
            SurfacePreset::Standard => "standard",
            SurfacePreset::Emissive => "emissive",
            SurfacePreset::Glass => "glass",
            SurfacePreset::Gold => "gold",
            SurfacePreset::Glow => "glow",
            SurfacePreset::Ember => "ember",
            SurfacePreset::Alternative => "alternative",
        }
    }

    pub fn base_color(self, tint: Option<Color>) -> Color {
        match self {
            SurfacePreset::Standard | SurfacePreset::Emissive => tint.unwrap_or(Color::WHITE),
            SurfacePreset::Glass => tint.unwrap_or(Color::srgb_u8(0x88, 0xcc, 0xee)),
            SurfacePreset::Gold => Color::srgb_u8(0xff, 0xd7, 0x00),
            SurfacePreset::Glow => Color::WHITE,
            SurfacePreset::Ember => Color::srgb_u8(0xff, 0x66, 0x00),
            SurfacePreset::Alternative => Color::srgb_u8(0x00, 0xff, 0x00),
        }
    }

    /// Colour of the emissive channel before intensity scaling.
    pub fn emissive_color(self, tint: Option<Color>) -> Color {
        match self {
            SurfacePreset::Standard | SurfacePreset::Alternative => Color::BLACK,
            SurfacePreset::Emissive | SurfacePreset::Glass | SurfacePreset::Gold => self.base_color(tint),
            SurfacePreset::Glow => Color::srgb_u8(0x00, 0xff, 0x00),
            SurfacePreset::Ember => Color::srgb_u8(0xff, 0x22, 0x00),
        }
    }

    pub fn default_emissive_intensity(self) -> f32 {
        match self {
            SurfacePreset::Emissive => 1.0,
            SurfacePreset::Glow => 2.0,
            _ => 0.0,
        }
    }
}

impl fmt::Display for SurfacePreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for SurfacePreset {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase();
        if key == "physical" {
            return Ok(SurfacePreset::Glass);
        }
        SurfacePreset::ALL
            .into_iter()
            .find(|p| p.label() == key)
            .ok_or_else(|| format!("unknown material preset '{s}'"))
    }
}

/// Material selection for loaded models: keep the asset's own materials or override with a preset.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ModelMaterial {
    #[default]
    Original,
    Preset(SurfacePreset),
}

impl ModelMaterial {
    pub fn label(self) -> &'static str {
        match self {
            ModelMaterial::Original => "original",
            ModelMaterial::Preset(p) => p.label(),
        }
    }
}

impl fmt::Display for ModelMaterial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ModelMaterial {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("original") {
            Ok(ModelMaterial::Original)
        } else {
            s.parse().map(ModelMaterial::Preset)
        }
    }
}

/// Scales an emissive colour the way an emissive-intensity slider would.
pub fn scaled_emissive(color: Color, intensity: f32) -> LinearRgba {
    let c = color.to_linear();
    LinearRgba::rgb(c.red * intensity, c.green * intensity, c.blue * intensity)
}

/// The single mapping from preset to engine material.
pub fn surface_material(
    preset: SurfacePreset,
    tint: Option<Color>,
    emissive_intensity: Option<f32>,
) -> StandardMaterial {
    let intensity = emissive_intensity.unwrap_or_else(|| preset.default_emissive_intensity());
    let emissive = scaled_emissive(preset.emissive_color(tint), intensity);
    let base_color = preset.base_color(tint);
    match preset {
        SurfacePreset::Standard | SurfacePreset::Emissive => StandardMaterial {
            base_color,
            emissive,
            perceptual_roughness: 1.0,
            metallic: 0.0,
            ..default()
        },
        SurfacePreset::Glass => StandardMaterial {
            base_color: base_color.with_alpha(0.6),
            emissive,
            metallic: 0.5,
            perceptual_roughness: 0.1,
            specular_transmission: 0.7,
            alpha_mode: AlphaMode::Blend,
            ..default()
        },
        SurfacePreset::Gold => StandardMaterial {
            base_color,
            emissive,
            metallic: 1.0,
            perceptual_roughness: 0.2,
            ..default()
        },
        SurfacePreset::Glow => StandardMaterial { base_color, emissive, ..default() },
        SurfacePreset::Ember => StandardMaterial {
            base_color,
            emissive,
            metallic: 0.4,
            perceptual_roughness: 0.3,
            ..default()
        },
        SurfacePreset::Alternative => StandardMaterial {
            base_color: base_color.with_alpha(0.7),
            metallic: 0.8,
            perceptual_roughness: 0.2,
            alpha_mode: AlphaMode::Blend,
            ..default()
        },
    }
}

/// Material a preset puts on every mesh of a loaded model. Glass is thinner and non-metallic,
/// gold is rougher than on the procedural shapes.
pub fn model_override_material(preset: SurfacePreset) -> StandardMaterial {
    let mut material = surface_material(preset, None, None);
    match preset {
        SurfacePreset::Glass => {
            material.base_color = material.base_color.with_alpha(0.5);
            material.metallic = 0.0;
        }
        SurfacePreset::Gold => material.perceptual_roughness = 0.3,
        _ => {}
    }
    material
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preset_labels_round_trip_through_from_str() {
        for preset in SurfacePreset::ALL {
            assert_eq!(preset.label().parse::<SurfacePreset>(), Ok(preset));
        }
        assert_eq!("Physical".parse::<SurfacePreset>(), Ok(SurfacePreset::Glass));
        assert!("chrome".parse::<SurfacePreset>().is_err());
    }

    #[test]
    fn model_material_parses_original_and_presets() {
        assert_eq!("original".parse::<ModelMaterial>(), Ok(ModelMaterial::Original));
        assert_eq!("gold".parse::<ModelMaterial>(), Ok(ModelMaterial::Preset(SurfacePreset::Gold)));
    }

    #[test]
    fn glass_is_translucent_and_uses_tint() {
        let tint = Color::srgb(1.0, 0.0, 0.0);
        let mat = surface_material(SurfacePreset::Glass, Some(tint), None);
        assert!(matches!(mat.alpha_mode, AlphaMode::Blend));
        assert!((mat.base_color.alpha() - 0.6).abs() < 1e-6);
        assert_eq!(mat.base_color.to_srgba().red, 1.0);
    }

    #[test]
    fn model_overrides_use_thinner_glass_and_rougher_gold() {
        let glass = model_override_material(SurfacePreset::Glass);
        assert!((glass.base_color.alpha() - 0.5).abs() < 1e-6);
        assert_eq!(glass.metallic, 0.0);
        assert!(matches!(glass.alpha_mode, AlphaMode::Blend));
        let gold = model_override_material(SurfacePreset::Gold);
        assert_eq!(gold.perceptual_roughness, 0.3);
        assert_eq!(gold.metallic, 1.0);
        assert_eq!(surface_material(SurfacePreset::Gold, None, None).perceptual_roughness, 0.2);
        assert!((model_override_material(SurfacePreset::Alternative).base_color.alpha() - 0.7).abs() < 1e-6);
    }

    #[test]
    fn standard_preset_does_not_glow() {
        let mat = surface_material(SurfacePreset::Standard, Some(Color::WHITE), None);
        assert_eq!(mat.emissive, LinearRgba::BLACK);
    }

    #[test]
    fn emissive_intensity_scales_channel() {
        let low = surface_material(SurfacePreset::Ember, None, Some(1.0));
        let high = surface_material(SurfacePreset::Ember, None, Some(5.0));
        assert!((high.emissive.red - low.emissive.red * 5.0).abs() < 1e-5);
    }
}
