//! Table configuration types.
//!
//! The table is configured once at startup by providing:
//! - `ZoneConfig`: one entry per zone (name, bounds, drop policy, capacity)
//! - `ArrangementConfig` / `DragConfig`: tuning for layout and dragging
//! - `TableConfig`: combines all configuration, including the fallback zone
//!
//! The engine never hardcodes zones. `TableLayout` provides the standard
//! two-seat layout (hands, battlefields, decks, discards) for hosts that
//! don't bring their own.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::error::{SpatialError, SpatialResult};
use super::geometry::Aabb;

/// Width of the table in world units.
pub const TABLE_WIDTH: f32 = 20.0;

/// Depth of the table in world units.
pub const TABLE_DEPTH: f32 = 15.0;

/// Height of the volume generated for standard-layout zones.
pub const ZONE_THICKNESS: f32 = 1.0;

/// Logical role of a zone.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZoneKind {
    Hand,
    Battlefield,
    Deck,
    Discard,
    Exile,
    Graveyard,
}

impl ZoneKind {
    /// Capacity a zone of this kind gets when none is given.
    #[must_use]
    pub const fn default_capacity(self) -> usize {
        match self {
            ZoneKind::Hand => 7,
            ZoneKind::Battlefield => 20,
            ZoneKind::Deck => 60,
            ZoneKind::Discard | ZoneKind::Exile | ZoneKind::Graveyard => 100,
        }
    }

    /// Short name used in standard zone names (`player-hand`, ...).
    #[must_use]
    pub const fn slug(self) -> &'static str {
        match self {
            ZoneKind::Hand => "hand",
            ZoneKind::Battlefield => "battlefield",
            ZoneKind::Deck => "deck",
            ZoneKind::Discard => "discard",
            ZoneKind::Exile => "exile",
            ZoneKind::Graveyard => "graveyard",
        }
    }
}

/// Which side of the table owns a zone.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Seat {
    Player,
    Opponent,
}

impl Seat {
    #[must_use]
    pub const fn slug(self) -> &'static str {
        match self {
            Seat::Player => "player",
            Seat::Opponent => "opponent",
        }
    }
}

/// Configuration for a single zone.
///
/// Bounds and policy are fixed once the zone is registered.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ZoneConfig {
    /// Unique name, used for lookup.
    pub name: String,

    /// Spatial extent used for drop and collision tests.
    pub bounds: Aabb,

    /// Whether cards may be placed here.
    #[serde(default = "default_true")]
    pub accepts_cards: bool,

    /// Maximum cards allowed. `None` for unlimited.
    #[serde(default)]
    pub capacity: Option<usize>,

    /// Logical role, if any.
    #[serde(default)]
    pub kind: Option<ZoneKind>,

    /// Owning seat. `None` for shared zones.
    #[serde(default)]
    pub owner: Option<Seat>,
}

fn default_true() -> bool {
    true
}

impl ZoneConfig {
    /// Create an accepting, unbounded zone centered at `center`.
    pub fn new(name: impl Into<String>, center: Vec3, size: Vec3) -> Self {
        Self {
            name: name.into(),
            bounds: Aabb::from_center_size(center, size),
            accepts_cards: true,
            capacity: None,
            kind: None,
            owner: None,
        }
    }

    /// Mark the zone as refusing cards.
    #[must_use]
    pub fn rejecting(mut self) -> Self {
        self.accepts_cards = false;
        self
    }

    /// Set the drop policy explicitly.
    #[must_use]
    pub fn with_accepts_cards(mut self, accepts: bool) -> Self {
        self.accepts_cards = accepts;
        self
    }

    /// Set maximum card limit.
    #[must_use]
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = Some(capacity);
        self
    }

    /// Set the zone kind. Also sets the kind's default capacity unless a
    /// capacity was already given.
    #[must_use]
    pub fn of_kind(mut self, kind: ZoneKind) -> Self {
        self.kind = Some(kind);
        if self.capacity.is_none() {
            self.capacity = Some(kind.default_capacity());
        }
        self
    }

    /// Set the owning seat.
    #[must_use]
    pub fn with_owner(mut self, owner: Seat) -> Self {
        self.owner = Some(owner);
        self
    }
}

/// Tuning for the arrangement engine.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArrangementConfig {
    /// Largest gap between neighbouring cards.
    pub spacing_cap: f32,

    /// Share of the zone's length that a full row may use.
    pub fill_ratio: f32,

    /// Seconds a relocation takes.
    pub relocation_duration: f32,

    /// Height above the zone center at which cards come to rest.
    pub rest_height: f32,
}

impl Default for ArrangementConfig {
    fn default() -> Self {
        Self {
            spacing_cap: 2.0,
            fill_ratio: 0.8,
            relocation_duration: 0.5,
            rest_height: 0.1,
        }
    }
}

/// Tuning for the drag controller.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DragConfig {
    /// Fraction of the remaining distance covered per drag update.
    pub smoothing: f32,

    /// How far a card is raised while held.
    pub lift_height: f32,

    /// Mass restored to a card's body when it is let go.
    pub resting_mass: f32,
}

impl Default for DragConfig {
    fn default() -> Self {
        Self {
            smoothing: 0.35,
            lift_height: 0.5,
            resting_mass: 0.1,
        }
    }
}

/// Complete table configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TableConfig {
    /// Zones, in registration order.
    pub zones: Vec<ZoneConfig>,

    /// Zone that takes cards dropped outside any accepting zone.
    pub fallback_zone: String,

    #[serde(default)]
    pub arrangement: ArrangementConfig,

    #[serde(default)]
    pub drag: DragConfig,
}

impl TableConfig {
    /// Create an empty configuration with the given fallback zone.
    pub fn new(fallback_zone: impl Into<String>) -> Self {
        Self {
            zones: Vec::new(),
            fallback_zone: fallback_zone.into(),
            arrangement: ArrangementConfig::default(),
            drag: DragConfig::default(),
        }
    }

    /// The standard two-seat table for a form factor.
    ///
    /// Falls back to `player-hand`.
    #[must_use]
    pub fn standard(form_factor: FormFactor) -> Self {
        let mut config = Self::new("player-hand");
        config.zones = TableLayout::for_form_factor(form_factor).zone_configs();
        config
    }

    /// Parse a configuration from JSON.
    pub fn from_json(json: &str) -> SpatialResult<Self> {
        serde_json::from_str(json).map_err(|e| SpatialError::InvalidConfig(e.to_string()))
    }

    /// Add a zone configuration.
    #[must_use]
    pub fn with_zone(mut self, zone: ZoneConfig) -> Self {
        self.zones.push(zone);
        self
    }

    #[must_use]
    pub fn with_arrangement(mut self, arrangement: ArrangementConfig) -> Self {
        self.arrangement = arrangement;
        self
    }

    #[must_use]
    pub fn with_drag(mut self, drag: DragConfig) -> Self {
        self.drag = drag;
        self
    }

    /// Get a zone config by name.
    #[must_use]
    pub fn get_zone(&self, name: &str) -> Option<&ZoneConfig> {
        self.zones.iter().find(|z| z.name == name)
    }

    /// Check the parts of the configuration the registry can't check.
    ///
    /// Duplicate zone names are reported by the registry itself.
    pub fn validate(&self) -> SpatialResult<()> {
        let fallback = self
            .get_zone(&self.fallback_zone)
            .ok_or_else(|| SpatialError::UnknownZone(self.fallback_zone.clone()))?;
        if !fallback.accepts_cards {
            return Err(SpatialError::InvalidConfig(format!(
                "fallback zone `{}` does not accept cards",
                fallback.name
            )));
        }

        let arrangement = &self.arrangement;
        if !(arrangement.fill_ratio > 0.0 && arrangement.fill_ratio <= 1.0) {
            return Err(SpatialError::InvalidConfig(format!(
                "fill_ratio must be in (0, 1], got {}",
                arrangement.fill_ratio
            )));
        }
        if !(arrangement.spacing_cap > 0.0) {
            return Err(SpatialError::InvalidConfig("spacing_cap must be positive".into()));
        }
        if arrangement.relocation_duration < 0.0 {
            return Err(SpatialError::InvalidConfig(
                "relocation_duration must not be negative".into(),
            ));
        }
        if !(self.drag.smoothing > 0.0 && self.drag.smoothing <= 1.0) {
            return Err(SpatialError::InvalidConfig(format!(
                "drag smoothing must be in (0, 1], got {}",
                self.drag.smoothing
            )));
        }
        Ok(())
    }
}

/// Device class, which picks the standard layout.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormFactor {
    Desktop,
    Tablet,
    Mobile,
}

impl FormFactor {
    /// Classify a viewport by its width in CSS pixels.
    #[must_use]
    pub fn from_viewport_width(width: u32) -> Self {
        match width {
            0..=768 => FormFactor::Mobile,
            769..=1024 => FormFactor::Tablet,
            _ => FormFactor::Desktop,
        }
    }
}

/// A zone rectangle in normalized screen coordinates (0..1 on both axes).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct NormalizedRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl NormalizedRect {
    #[must_use]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// World-space bounds on a `TABLE_WIDTH` x `TABLE_DEPTH` table.
    ///
    /// The rect origin maps to the zone center.
    #[must_use]
    pub fn to_world(self) -> Aabb {
        let center = Vec3::new((self.x - 0.5) * TABLE_WIDTH, 0.0, (self.y - 0.5) * TABLE_DEPTH);
        let size = Vec3::new(self.width * TABLE_WIDTH, ZONE_THICKNESS, self.height * TABLE_DEPTH);
        Aabb::from_center_size(center, size)
    }
}

/// One entry of the standard layout.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayoutSlot {
    pub seat: Seat,
    pub kind: ZoneKind,
    pub rect: NormalizedRect,
}

impl LayoutSlot {
    /// Zone name, e.g. `opponent-discard`.
    #[must_use]
    pub fn zone_name(&self) -> String {
        format!("{}-{}", self.seat.slug(), self.kind.slug())
    }

    /// Battlefields take drops from anyone; other zones only from their owner.
    #[must_use]
    pub fn accepts_drops(&self) -> bool {
        self.kind == ZoneKind::Battlefield || self.seat == Seat::Player
    }

    #[must_use]
    pub fn zone_config(&self) -> ZoneConfig {
        ZoneConfig {
            name: self.zone_name(),
            bounds: self.rect.to_world(),
            accepts_cards: self.accepts_drops(),
            capacity: Some(self.kind.default_capacity()),
            kind: Some(self.kind),
            owner: Some(self.seat),
        }
    }
}

/// The standard two-seat table layout.
#[derive(Clone, Debug, PartialEq)]
pub struct TableLayout {
    pub slots: Vec<LayoutSlot>,
}

impl TableLayout {
    /// Layout used for a form factor.
    #[must_use]
    pub fn for_form_factor(form_factor: FormFactor) -> Self {
        use NormalizedRect as R;

        // hand, battlefield, deck, discard for player then opponent
        let rects: [R; 8] = match form_factor {
            FormFactor::Mobile => [
                R::new(0.05, 0.8, 0.9, 0.15),
                R::new(0.05, 0.6, 0.9, 0.15),
                R::new(0.8, 0.05, 0.15, 0.1),
                R::new(0.05, 0.05, 0.15, 0.1),
                R::new(0.05, 0.05, 0.9, 0.1),
                R::new(0.05, 0.2, 0.9, 0.15),
                R::new(0.05, 0.35, 0.15, 0.1),
                R::new(0.8, 0.35, 0.15, 0.1),
            ],
            FormFactor::Tablet => [
                R::new(0.1, 0.75, 0.8, 0.2),
                R::new(0.1, 0.55, 0.8, 0.15),
                R::new(0.85, 0.1, 0.12, 0.15),
                R::new(0.03, 0.1, 0.12, 0.15),
                R::new(0.1, 0.05, 0.8, 0.15),
                R::new(0.1, 0.25, 0.8, 0.15),
                R::new(0.03, 0.75, 0.12, 0.15),
                R::new(0.85, 0.75, 0.12, 0.15),
            ],
            FormFactor::Desktop => [
                R::new(0.15, 0.8, 0.7, 0.18),
                R::new(0.15, 0.55, 0.7, 0.2),
                R::new(0.87, 0.1, 0.1, 0.15),
                R::new(0.03, 0.1, 0.1, 0.15),
                R::new(0.15, 0.02, 0.7, 0.15),
                R::new(0.15, 0.25, 0.7, 0.2),
                R::new(0.03, 0.75, 0.1, 0.15),
                R::new(0.87, 0.75, 0.1, 0.15),
            ],
        };

        let kinds = [ZoneKind::Hand, ZoneKind::Battlefield, ZoneKind::Deck, ZoneKind::Discard];
        let slots = [Seat::Player, Seat::Opponent]
            .into_iter()
            .flat_map(|seat| kinds.into_iter().map(move |kind| (seat, kind)))
            .zip(rects)
            .map(|((seat, kind), rect)| LayoutSlot { seat, kind, rect })
            .collect();

        Self { slots }
    }

    /// Zone configurations in slot order.
    #[must_use]
    pub fn zone_configs(&self) -> Vec<ZoneConfig> {
        self.slots.iter().map(LayoutSlot::zone_config).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zone_config_builder() {
        let zone = ZoneConfig::new("hand", Vec3::new(0.0, 0.0, 6.0), Vec3::new(12.0, 1.0, 3.0))
            .of_kind(ZoneKind::Hand)
            .with_owner(Seat::Player);

        assert_eq!(zone.name, "hand");
        assert!(zone.accepts_cards);
        assert_eq!(zone.capacity, Some(7));
        assert_eq!(zone.owner, Some(Seat::Player));
    }

    #[test]
    fn test_explicit_capacity_wins_over_kind() {
        let zone = ZoneConfig::new("hand", Vec3::ZERO, Vec3::ONE)
            .with_capacity(10)
            .of_kind(ZoneKind::Hand);
        assert_eq!(zone.capacity, Some(10));
    }

    #[test]
    fn test_rejecting() {
        let zone = ZoneConfig::new("deck", Vec3::ZERO, Vec3::ONE).rejecting();
        assert!(!zone.accepts_cards);
    }

    #[test]
    fn test_validate_requires_fallback() {
        let config = TableConfig::new("hand")
            .with_zone(ZoneConfig::new("battlefield", Vec3::ZERO, Vec3::ONE));
        assert_eq!(config.validate(), Err(SpatialError::UnknownZone("hand".into())));
    }

    #[test]
    fn test_validate_rejecting_fallback() {
        let config = TableConfig::new("hand")
            .with_zone(ZoneConfig::new("hand", Vec3::ZERO, Vec3::ONE).rejecting());
        assert!(matches!(config.validate(), Err(SpatialError::InvalidConfig(_))));
    }

    #[test]
    fn test_validate_ratios() {
        let config = TableConfig::new("hand")
            .with_zone(ZoneConfig::new("hand", Vec3::ZERO, Vec3::ONE))
            .with_arrangement(ArrangementConfig {
                fill_ratio: 1.5,
                ..ArrangementConfig::default()
            });
        assert!(matches!(config.validate(), Err(SpatialError::InvalidConfig(_))));

        let config = TableConfig::new("hand")
            .with_zone(ZoneConfig::new("hand", Vec3::ZERO, Vec3::ONE))
            .with_drag(DragConfig {
                smoothing: 0.0,
                ..DragConfig::default()
            });
        assert!(matches!(config.validate(), Err(SpatialError::InvalidConfig(_))));
    }

    #[test]
    fn test_from_json_defaults() {
        let json = r#"{
            "zones": [
                {
                    "name": "hand",
                    "bounds": { "min": [-6.0, -0.5, 4.5], "max": [6.0, 0.5, 7.5] },
                    "capacity": 10
                }
            ],
            "fallback_zone": "hand"
        }"#;

        let config = TableConfig::from_json(json).unwrap();
        assert_eq!(config.zones.len(), 1);
        assert!(config.zones[0].accepts_cards);
        assert_eq!(config.zones[0].capacity, Some(10));
        assert_eq!(config.arrangement, ArrangementConfig::default());
        assert_eq!(config.drag, DragConfig::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_json_malformed() {
        assert!(matches!(
            TableConfig::from_json("{ not json"),
            Err(SpatialError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_form_factor_breakpoints() {
        assert_eq!(FormFactor::from_viewport_width(375), FormFactor::Mobile);
        assert_eq!(FormFactor::from_viewport_width(768), FormFactor::Mobile);
        assert_eq!(FormFactor::from_viewport_width(1024), FormFactor::Tablet);
        assert_eq!(FormFactor::from_viewport_width(1920), FormFactor::Desktop);
    }

    #[test]
    fn test_normalized_rect_to_world() {
        let bounds = NormalizedRect::new(0.15, 0.8, 0.7, 0.18).to_world();
        let center = bounds.center();
        assert!((center.x - -7.0).abs() < 1e-4);
        assert!((center.z - 4.5).abs() < 1e-4);
        assert!((bounds.size().x - 14.0).abs() < 1e-4);
        assert!((bounds.size().z - 2.7).abs() < 1e-4);
    }

    #[test]
    fn test_standard_layout() {
        let config = TableConfig::standard(FormFactor::Desktop);
        assert_eq!(config.zones.len(), 8);
        assert!(config.validate().is_ok());

        let player_hand = config.get_zone("player-hand").unwrap();
        assert!(player_hand.accepts_cards);
        assert_eq!(player_hand.capacity, Some(7));

        let opponent_hand = config.get_zone("opponent-hand").unwrap();
        assert!(!opponent_hand.accepts_cards);

        let opponent_field = config.get_zone("opponent-battlefield").unwrap();
        assert!(opponent_field.accepts_cards);
        assert_eq!(opponent_field.capacity, Some(20));
    }

    #[test]
    fn test_json_round_trip() {
        let config = TableConfig::standard(FormFactor::Tablet);
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(TableConfig::from_json(&json).unwrap(), config);
    }
}
