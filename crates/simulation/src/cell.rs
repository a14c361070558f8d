//! Pixel kinds, per-kind auxiliary data, and the per-coordinate cell state.

use std::fmt;

use crate::color::{hsb_to_rgb, HuePalette, Rgba};

/// Base color of plain sand.
const SAND_COLOR: Rgba = Rgba::opaque(194, 178, 128);

/// Base color of gravel.
const GRAVEL_COLOR: Rgba = Rgba::opaque(110, 104, 96);

/// Saturation (percent) of freshly created colored sand.
const COLORED_SAND_SATURATION: u8 = 30;

/// Brightness (percent) of freshly created colored sand.
const COLORED_SAND_BRIGHTNESS: u8 = 85;

/// Closed set of particle kinds. Declaration order fixes the brush cycle.
#[repr(u8)]
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum PixelKind {
    Sand = 0,
    ColoredSand = 1,
    Gravel = 2,
}

impl PixelKind {
    /// Every kind, in cycle order.
    pub const ALL: [Self; 3] = [Self::Sand, Self::ColoredSand, Self::Gravel];

    /// Cyclic successor: declaration order, last wraps to first.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Sand => Self::ColoredSand,
            Self::ColoredSand => Self::Gravel,
            Self::Gravel => Self::Sand,
        }
    }

    /// Display name for the HUD.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Sand => "Sand",
            Self::ColoredSand => "Colored Sand",
            Self::Gravel => "Gravel",
        }
    }

    /// Fresh auxiliary data for a newly activated particle of this kind.
    ///
    /// Colored sand samples (and advances) the palette's hue cursor, so
    /// particles created back to back get neighboring colors. Gravel
    /// carries no data at all.
    #[must_use]
    pub fn default_data(self, palette: &mut HuePalette) -> Option<PixelData> {
        match self {
            Self::Sand => Some(PixelData::Sand(AccelerationData::new())),
            Self::ColoredSand => Some(PixelData::ColoredSand(ColoredSandData::new(palette))),
            Self::Gravel => None,
        }
    }
}

impl fmt::Display for PixelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Fall-speed counter for kinds with accelerating free-fall.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct AccelerationData {
    /// Rows this particle will attempt to fall next tick. Starts at 1;
    /// impact resets it to 0 before the post-fall increment.
    pub fall_speed: i32,
}

impl AccelerationData {
    #[must_use]
    pub const fn new() -> Self {
        Self { fall_speed: 1 }
    }
}

impl Default for AccelerationData {
    fn default() -> Self {
        Self::new()
    }
}

/// Colored sand accelerates like plain sand and keeps the color it was
/// born with.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct ColoredSandData {
    pub accel: AccelerationData,
    pub color: Rgba,
}

impl ColoredSandData {
    /// Samples the palette once; the color never changes afterwards.
    #[must_use]
    pub fn new(palette: &mut HuePalette) -> Self {
        Self {
            accel: AccelerationData::new(),
            color: hsb_to_rgb(
                palette.sample(),
                COLORED_SAND_SATURATION,
                COLORED_SAND_BRIGHTNESS,
            ),
        }
    }
}

/// Kind-specific auxiliary state: one variant per kind that carries any.
/// Kinds with none (gravel) store no data, not an empty record.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum PixelData {
    Sand(AccelerationData),
    ColoredSand(ColoredSandData),
}

impl PixelData {
    const fn acceleration(&self) -> &AccelerationData {
        match self {
            Self::Sand(accel) => accel,
            Self::ColoredSand(colored) => &colored.accel,
        }
    }

    fn acceleration_mut(&mut self) -> &mut AccelerationData {
        match self {
            Self::Sand(accel) => accel,
            Self::ColoredSand(colored) => &mut colored.accel,
        }
    }
}

/// One grid coordinate's state.
///
/// `data`'s variant must match `kind`; [`Cell::reset`] is the only
/// sanctioned way to regenerate it after a kind change. A disabled cell's
/// kind and data are meaningless and must not feed simulation decisions.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Cell {
    pub enabled: bool,
    pub kind: PixelKind,
    data: Option<PixelData>,
}

impl Default for Cell {
    /// Cells are born disabled; kind and data stay meaningless until the
    /// first reset.
    fn default() -> Self {
        Self {
            enabled: false,
            kind: PixelKind::Sand,
            data: None,
        }
    }
}

impl Cell {
    /// A fresh active particle of `kind`, as paint and fill create them.
    #[must_use]
    pub fn active(kind: PixelKind, palette: &mut HuePalette) -> Self {
        let mut cell = Self {
            kind,
            ..Self::default()
        };
        cell.reset(palette);
        cell.enabled = true;
        cell
    }

    /// Disable the cell and regenerate `data` for the current `kind`.
    ///
    /// Callers activating a particle set `enabled = true` afterwards.
    pub fn reset(&mut self, palette: &mut HuePalette) {
        self.enabled = false;
        self.data = self.kind.default_data(palette);
    }

    /// The raw auxiliary data, if the kind carries any.
    #[must_use]
    pub const fn data(&self) -> Option<&PixelData> {
        self.data.as_ref()
    }

    /// Fall-speed data for accelerating kinds.
    ///
    /// # Panics
    ///
    /// Panics if the cell's kind carries no acceleration data — a kind
    /// change bypassed [`Cell::reset`] somewhere upstream.
    #[must_use]
    pub fn acceleration(&self) -> &AccelerationData {
        match &self.data {
            Some(data) => data.acceleration(),
            None => panic!("{} carries no acceleration data", self.kind),
        }
    }

    /// Mutable fall-speed data for accelerating kinds.
    ///
    /// # Panics
    ///
    /// Panics under the same conditions as [`Cell::acceleration`].
    pub fn acceleration_mut(&mut self) -> &mut AccelerationData {
        match &mut self.data {
            Some(data) => data.acceleration_mut(),
            None => panic!("{} carries no acceleration data", self.kind),
        }
    }

    /// The creation-time data of a colored-sand particle.
    ///
    /// # Panics
    ///
    /// Panics if the cell's data is not the colored-sand variant.
    #[must_use]
    pub fn colored(&self) -> &ColoredSandData {
        match &self.data {
            Some(PixelData::ColoredSand(colored)) => colored,
            _ => panic!("{} carries no colored-sand data", self.kind),
        }
    }

    /// The color this cell renders as: fixed per kind, except colored
    /// sand, which keeps the color cached at creation.
    #[must_use]
    pub fn display_color(&self) -> Rgba {
        match self.kind {
            PixelKind::Sand => SAND_COLOR,
            PixelKind::ColoredSand => self.colored().color,
            PixelKind::Gravel => GRAVEL_COLOR,
        }
    }
}
