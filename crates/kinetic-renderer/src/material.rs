//! Material System
//!
//! Phong materials and the classic OpenGL preset table.

use glam::Vec3;

/// Phong material parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    /// Ambient reflectance
    pub ambient: Vec3,
    /// Diffuse reflectance
    pub diffuse: Vec3,
    /// Specular reflectance
    pub specular: Vec3,
    /// Specular exponent
    pub shininess: f32,
}

impl Material {
    pub const fn new(ambient: Vec3, diffuse: Vec3, specular: Vec3, shininess: f32) -> Self {
        Self {
            ambient,
            diffuse,
            specular,
            shininess,
        }
    }

    /// Single-color material with equal reflectance for every component
    pub fn from_color(color: Vec3, shininess: f32) -> Self {
        Self::new(color, color, color, shininess)
    }

    /// Copy of this material with its ambient term multiplied by `scale`
    pub fn scale_ambient(&self, scale: f32) -> Self {
        Self {
            ambient: self.ambient * scale,
            ..*self
        }
    }

    /// Look up a preset by its snake_case name
    pub fn preset(name: &str) -> Option<Material> {
        PRESETS
            .iter()
            .find(|(preset, _)| *preset == name)
            .map(|(_, material)| *material)
    }
}

impl Default for Material {
    fn default() -> Self {
        WHITE_PLASTIC
    }
}

const fn rgb(r: f32, g: f32, b: f32) -> Vec3 {
    Vec3::new(r, g, b)
}

pub const EMERALD: Material = Material::new(
    rgb(0.0215, 0.1745, 0.0215),
    rgb(0.07568, 0.61424, 0.07568),
    rgb(0.633, 0.727811, 0.633),
    0.6,
);
pub const JADE: Material = Material::new(
    rgb(0.135, 0.2225, 0.1575),
    rgb(0.54, 0.89, 0.63),
    rgb(0.316228, 0.316228, 0.316228),
    0.1,
);
pub const OBSIDIAN: Material = Material::new(
    rgb(0.05375, 0.05, 0.06625),
    rgb(0.18275, 0.17, 0.22525),
    rgb(0.332741, 0.328634, 0.346435),
    0.3,
);
pub const PEARL: Material = Material::new(
    rgb(0.25, 0.20725, 0.20725),
    rgb(1.0, 0.829, 0.829),
    rgb(0.296648, 0.296648, 0.296648),
    0.088,
);
pub const RUBY: Material = Material::new(
    rgb(0.1745, 0.01175, 0.01175),
    rgb(0.61424, 0.04136, 0.04136),
    rgb(0.727811, 0.626959, 0.626959),
    0.6,
);
pub const TURQUOISE: Material = Material::new(
    rgb(0.1, 0.18725, 0.1745),
    rgb(0.396, 0.74151, 0.69102),
    rgb(0.297254, 0.30829, 0.306678),
    0.1,
);
pub const BRASS: Material = Material::new(
    rgb(0.329412, 0.223529, 0.027451),
    rgb(0.780392, 0.568627, 0.113725),
    rgb(0.992157, 0.941176, 0.807843),
    0.21794872,
);
pub const BRONZE: Material = Material::new(
    rgb(0.2125, 0.1275, 0.054),
    rgb(0.714, 0.4284, 0.18144),
    rgb(0.393548, 0.271906, 0.166721),
    0.2,
);
pub const CHROME: Material = Material::new(
    rgb(0.25, 0.25, 0.25),
    rgb(0.4, 0.4, 0.4),
    rgb(0.774597, 0.774597, 0.774597),
    0.6,
);
pub const COPPER: Material = Material::new(
    rgb(0.19125, 0.0735, 0.0225),
    rgb(0.7038, 0.27048, 0.0828),
    rgb(0.256777, 0.137622, 0.086014),
    0.1,
);
pub const GOLD: Material = Material::new(
    rgb(0.24725, 0.1995, 0.0745),
    rgb(0.75164, 0.60648, 0.22648),
    rgb(0.628281, 0.555802, 0.366065),
    0.4,
);
pub const SILVER: Material = Material::new(
    rgb(0.19225, 0.19225, 0.19225),
    rgb(0.50754, 0.50754, 0.50754),
    rgb(0.508273, 0.508273, 0.508273),
    0.4,
);
pub const BLACK_PLASTIC: Material = Material::new(
    rgb(0.0, 0.0, 0.0),
    rgb(0.01, 0.01, 0.01),
    rgb(0.5, 0.5, 0.5),
    0.25,
);
pub const CYAN_PLASTIC: Material = Material::new(
    rgb(0.0, 0.1, 0.06),
    rgb(0.0, 0.50980392, 0.50980392),
    rgb(0.50196078, 0.50196078, 0.50196078),
    0.25,
);
pub const GREEN_PLASTIC: Material = Material::new(
    rgb(0.0, 0.0, 0.0),
    rgb(0.1, 0.35, 0.1),
    rgb(0.45, 0.55, 0.45),
    0.25,
);
pub const RED_PLASTIC: Material = Material::new(
    rgb(0.0, 0.0, 0.0),
    rgb(0.5, 0.0, 0.0),
    rgb(0.7, 0.6, 0.6),
    0.25,
);
pub const WHITE_PLASTIC: Material = Material::new(
    rgb(0.0, 0.0, 0.0),
    rgb(0.55, 0.55, 0.55),
    rgb(0.7, 0.7, 0.7),
    0.25,
);
pub const YELLOW_PLASTIC: Material = Material::new(
    rgb(0.0, 0.0, 0.0),
    rgb(0.5, 0.5, 0.0),
    rgb(0.6, 0.6, 0.5),
    0.25,
);
pub const BLACK_RUBBER: Material = Material::new(
    rgb(0.02, 0.02, 0.02),
    rgb(0.01, 0.01, 0.01),
    rgb(0.4, 0.4, 0.4),
    0.078125,
);
pub const CYAN_RUBBER: Material = Material::new(
    rgb(0.0, 0.05, 0.05),
    rgb(0.4, 0.5, 0.5),
    rgb(0.04, 0.7, 0.7),
    0.078125,
);
pub const GREEN_RUBBER: Material = Material::new(
    rgb(0.0, 0.05, 0.0),
    rgb(0.4, 0.5, 0.4),
    rgb(0.04, 0.7, 0.04),
    0.078125,
);
pub const RED_RUBBER: Material = Material::new(
    rgb(0.05, 0.0, 0.0),
    rgb(0.5, 0.4, 0.4),
    rgb(0.7, 0.04, 0.04),
    0.078125,
);
pub const WHITE_RUBBER: Material = Material::new(
    rgb(0.05, 0.05, 0.05),
    rgb(0.5, 0.5, 0.5),
    rgb(0.7, 0.7, 0.7),
    0.078125,
);
pub const YELLOW_RUBBER: Material = Material::new(
    rgb(0.05, 0.05, 0.0),
    rgb(0.5, 0.5, 0.4),
    rgb(0.7, 0.7, 0.04),
    0.078125,
);

/// Every preset with its lookup name
pub const PRESETS: &[(&str, Material)] = &[
    ("emerald", EMERALD),
    ("jade", JADE),
    ("obsidian", OBSIDIAN),
    ("pearl", PEARL),
    ("ruby", RUBY),
    ("turquoise", TURQUOISE),
    ("brass", BRASS),
    ("bronze", BRONZE),
    ("chrome", CHROME),
    ("copper", COPPER),
    ("gold", GOLD),
    ("silver", SILVER),
    ("black_plastic", BLACK_PLASTIC),
    ("cyan_plastic", CYAN_PLASTIC),
    ("green_plastic", GREEN_PLASTIC),
    ("red_plastic", RED_PLASTIC),
    ("white_plastic", WHITE_PLASTIC),
    ("yellow_plastic", YELLOW_PLASTIC),
    ("black_rubber", BLACK_RUBBER),
    ("cyan_rubber", CYAN_RUBBER),
    ("green_rubber", GREEN_RUBBER),
    ("red_rubber", RED_RUBBER),
    ("white_rubber", WHITE_RUBBER),
    ("yellow_rubber", YELLOW_RUBBER),
];
