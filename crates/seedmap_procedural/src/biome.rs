//! # Biome Identifiers
//!
//! Every overworld biome the generator can produce, keyed by its classic
//! numeric id, plus the id masks structure checks test against.

use std::fmt;
use std::str::FromStr;

use crate::error::{ProceduralError, ProceduralResult};

/// Overworld biomes, with their classic numeric ids as discriminants.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum Biome {
    /// Ocean
    Ocean = 0,
    /// Plains
    Plains = 1,
    /// Desert
    Desert = 2,
    /// Windswept hills
    WindsweptHills = 3,
    /// Forest
    Forest = 4,
    /// Taiga
    Taiga = 5,
    /// Swamp
    Swamp = 6,
    /// River
    River = 7,
    /// Frozen ocean
    FrozenOcean = 10,
    /// Frozen river
    FrozenRiver = 11,
    /// Snowy plains
    SnowyPlains = 12,
    /// Mushroom fields
    MushroomFields = 14,
    /// Beach
    Beach = 16,
    /// Jungle
    Jungle = 21,
    /// Sparse jungle
    SparseJungle = 23,
    /// Deep ocean
    DeepOcean = 24,
    /// Stony shore
    StonyShore = 25,
    /// Snowy beach
    SnowyBeach = 26,
    /// Birch forest
    BirchForest = 27,
    /// Dark forest
    DarkForest = 29,
    /// Snowy taiga
    SnowyTaiga = 30,
    /// Old growth pine taiga
    OldGrowthPineTaiga = 32,
    /// Windswept forest
    WindsweptForest = 34,
    /// Savanna
    Savanna = 35,
    /// Savanna plateau
    SavannaPlateau = 36,
    /// Badlands
    Badlands = 37,
    /// Wooded badlands
    WoodedBadlands = 38,
    /// Warm ocean
    WarmOcean = 44,
    /// Lukewarm ocean
    LukewarmOcean = 45,
    /// Cold ocean
    ColdOcean = 46,
    /// Deep warm ocean
    DeepWarmOcean = 47,
    /// Deep lukewarm ocean
    DeepLukewarmOcean = 48,
    /// Deep cold ocean
    DeepColdOcean = 49,
    /// Deep frozen ocean
    DeepFrozenOcean = 50,
    /// Sunflower plains
    SunflowerPlains = 129,
    /// Windswept gravelly hills
    WindsweptGravellyHills = 131,
    /// Flower forest
    FlowerForest = 132,
    /// Ice spikes
    IceSpikes = 140,
    /// Old growth birch forest
    OldGrowthBirchForest = 155,
    /// Old growth spruce taiga
    OldGrowthSpruceTaiga = 160,
    /// Windswept savanna
    WindsweptSavanna = 163,
    /// Eroded badlands
    ErodedBadlands = 165,
    /// Bamboo jungle
    BambooJungle = 168,
    /// Dripstone caves
    DripstoneCaves = 174,
    /// Lush caves
    LushCaves = 175,
    /// Meadow
    Meadow = 177,
    /// Grove
    Grove = 178,
    /// Snowy slopes
    SnowySlopes = 179,
    /// Jagged peaks
    JaggedPeaks = 180,
    /// Frozen peaks
    FrozenPeaks = 181,
    /// Stony peaks
    StonyPeaks = 182,
    /// Deep dark
    DeepDark = 183,
    /// Mangrove swamp
    MangroveSwamp = 184,
}

impl Biome {
    /// Every biome, in id order.
    pub const ALL: [Self; 53] = [
        Self::Ocean,
        Self::Plains,
        Self::Desert,
        Self::WindsweptHills,
        Self::Forest,
        Self::Taiga,
        Self::Swamp,
        Self::River,
        Self::FrozenOcean,
        Self::FrozenRiver,
        Self::SnowyPlains,
        Self::MushroomFields,
        Self::Beach,
        Self::Jungle,
        Self::SparseJungle,
        Self::DeepOcean,
        Self::StonyShore,
        Self::SnowyBeach,
        Self::BirchForest,
        Self::DarkForest,
        Self::SnowyTaiga,
        Self::OldGrowthPineTaiga,
        Self::WindsweptForest,
        Self::Savanna,
        Self::SavannaPlateau,
        Self::Badlands,
        Self::WoodedBadlands,
        Self::WarmOcean,
        Self::LukewarmOcean,
        Self::ColdOcean,
        Self::DeepWarmOcean,
        Self::DeepLukewarmOcean,
        Self::DeepColdOcean,
        Self::DeepFrozenOcean,
        Self::SunflowerPlains,
        Self::WindsweptGravellyHills,
        Self::FlowerForest,
        Self::IceSpikes,
        Self::OldGrowthBirchForest,
        Self::OldGrowthSpruceTaiga,
        Self::WindsweptSavanna,
        Self::ErodedBadlands,
        Self::BambooJungle,
        Self::DripstoneCaves,
        Self::LushCaves,
        Self::Meadow,
        Self::Grove,
        Self::SnowySlopes,
        Self::JaggedPeaks,
        Self::FrozenPeaks,
        Self::StonyPeaks,
        Self::DeepDark,
        Self::MangroveSwamp,
    ];

    /// The numeric biome id.
    #[inline]
    #[must_use]
    pub const fn id(self) -> u8 {
        self as u8
    }

    /// Looks up a biome by numeric id.
    #[must_use]
    pub const fn from_id(id: u8) -> Option<Self> {
        match id {
            0 => Some(Self::Ocean),
            1 => Some(Self::Plains),
            2 => Some(Self::Desert),
            3 => Some(Self::WindsweptHills),
            4 => Some(Self::Forest),
            5 => Some(Self::Taiga),
            6 => Some(Self::Swamp),
            7 => Some(Self::River),
            10 => Some(Self::FrozenOcean),
            11 => Some(Self::FrozenRiver),
            12 => Some(Self::SnowyPlains),
            14 => Some(Self::MushroomFields),
            16 => Some(Self::Beach),
            21 => Some(Self::Jungle),
            23 => Some(Self::SparseJungle),
            24 => Some(Self::DeepOcean),
            25 => Some(Self::StonyShore),
            26 => Some(Self::SnowyBeach),
            27 => Some(Self::BirchForest),
            29 => Some(Self::DarkForest),
            30 => Some(Self::SnowyTaiga),
            32 => Some(Self::OldGrowthPineTaiga),
            34 => Some(Self::WindsweptForest),
            35 => Some(Self::Savanna),
            36 => Some(Self::SavannaPlateau),
            37 => Some(Self::Badlands),
            38 => Some(Self::WoodedBadlands),
            44 => Some(Self::WarmOcean),
            45 => Some(Self::LukewarmOcean),
            46 => Some(Self::ColdOcean),
            47 => Some(Self::DeepWarmOcean),
            48 => Some(Self::DeepLukewarmOcean),
            49 => Some(Self::DeepColdOcean),
            50 => Some(Self::DeepFrozenOcean),
            129 => Some(Self::SunflowerPlains),
            131 => Some(Self::WindsweptGravellyHills),
            132 => Some(Self::FlowerForest),
            140 => Some(Self::IceSpikes),
            155 => Some(Self::OldGrowthBirchForest),
            160 => Some(Self::OldGrowthSpruceTaiga),
            163 => Some(Self::WindsweptSavanna),
            165 => Some(Self::ErodedBadlands),
            168 => Some(Self::BambooJungle),
            174 => Some(Self::DripstoneCaves),
            175 => Some(Self::LushCaves),
            177 => Some(Self::Meadow),
            178 => Some(Self::Grove),
            179 => Some(Self::SnowySlopes),
            180 => Some(Self::JaggedPeaks),
            181 => Some(Self::FrozenPeaks),
            182 => Some(Self::StonyPeaks),
            183 => Some(Self::DeepDark),
            184 => Some(Self::MangroveSwamp),
            _ => None,
        }
    }

    /// Snake-case resource name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Ocean => "ocean",
            Self::Plains => "plains",
            Self::Desert => "desert",
            Self::WindsweptHills => "windswept_hills",
            Self::Forest => "forest",
            Self::Taiga => "taiga",
            Self::Swamp => "swamp",
            Self::River => "river",
            Self::FrozenOcean => "frozen_ocean",
            Self::FrozenRiver => "frozen_river",
            Self::SnowyPlains => "snowy_plains",
            Self::MushroomFields => "mushroom_fields",
            Self::Beach => "beach",
            Self::Jungle => "jungle",
            Self::SparseJungle => "sparse_jungle",
            Self::DeepOcean => "deep_ocean",
            Self::StonyShore => "stony_shore",
            Self::SnowyBeach => "snowy_beach",
            Self::BirchForest => "birch_forest",
            Self::DarkForest => "dark_forest",
            Self::SnowyTaiga => "snowy_taiga",
            Self::OldGrowthPineTaiga => "old_growth_pine_taiga",
            Self::WindsweptForest => "windswept_forest",
            Self::Savanna => "savanna",
            Self::SavannaPlateau => "savanna_plateau",
            Self::Badlands => "badlands",
            Self::WoodedBadlands => "wooded_badlands",
            Self::WarmOcean => "warm_ocean",
            Self::LukewarmOcean => "lukewarm_ocean",
            Self::ColdOcean => "cold_ocean",
            Self::DeepWarmOcean => "deep_warm_ocean",
            Self::DeepLukewarmOcean => "deep_lukewarm_ocean",
            Self::DeepColdOcean => "deep_cold_ocean",
            Self::DeepFrozenOcean => "deep_frozen_ocean",
            Self::SunflowerPlains => "sunflower_plains",
            Self::WindsweptGravellyHills => "windswept_gravelly_hills",
            Self::FlowerForest => "flower_forest",
            Self::IceSpikes => "ice_spikes",
            Self::OldGrowthBirchForest => "old_growth_birch_forest",
            Self::OldGrowthSpruceTaiga => "old_growth_spruce_taiga",
            Self::WindsweptSavanna => "windswept_savanna",
            Self::ErodedBadlands => "eroded_badlands",
            Self::BambooJungle => "bamboo_jungle",
            Self::DripstoneCaves => "dripstone_caves",
            Self::LushCaves => "lush_caves",
            Self::Meadow => "meadow",
            Self::Grove => "grove",
            Self::SnowySlopes => "snowy_slopes",
            Self::JaggedPeaks => "jagged_peaks",
            Self::FrozenPeaks => "frozen_peaks",
            Self::StonyPeaks => "stony_peaks",
            Self::DeepDark => "deep_dark",
            Self::MangroveSwamp => "mangrove_swamp",
        }
    }

    /// Any ocean, shallow or deep.
    #[must_use]
    pub const fn is_oceanic(self) -> bool {
        self.is_shallow_ocean() || self.is_deep_ocean()
    }

    /// The five deep ocean variants.
    #[must_use]
    pub const fn is_deep_ocean(self) -> bool {
        matches!(
            self,
            Self::DeepOcean
                | Self::DeepWarmOcean
                | Self::DeepLukewarmOcean
                | Self::DeepColdOcean
                | Self::DeepFrozenOcean
        )
    }

    /// The five shallow ocean variants.
    #[must_use]
    pub const fn is_shallow_ocean(self) -> bool {
        matches!(
            self,
            Self::Ocean | Self::FrozenOcean | Self::WarmOcean | Self::LukewarmOcean | Self::ColdOcean
        )
    }

    /// Cave biomes classified below the surface.
    #[must_use]
    pub const fn is_underground(self) -> bool {
        matches!(self, Self::DripstoneCaves | Self::LushCaves | Self::DeepDark)
    }
}

impl fmt::Display for Biome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Biome {
    type Err = ProceduralError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace(['-', ' '], "_");
        let wanted = wanted.strip_prefix("minecraft:").unwrap_or(&wanted);
        Self::ALL
            .into_iter()
            .find(|biome| biome.name() == wanted)
            .ok_or_else(|| ProceduralError::UnknownBiome(s.to_string()))
    }
}

impl TryFrom<u8> for Biome {
    type Error = ProceduralError;

    fn try_from(id: u8) -> ProceduralResult<Self> {
        Self::from_id(id).ok_or(ProceduralError::UnknownBiomeId(id))
    }
}

/// A set of biomes as two id bitmasks.
///
/// `low` holds ids `0..64`, `high` holds ids `128..192`. No overworld biome
/// uses the ids in between.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct BiomeMask {
    low: u64,
    high: u64,
}

impl BiomeMask {
    /// The empty set.
    pub const EMPTY: Self = Self { low: 0, high: 0 };

    /// Water a monument may border: every ocean plus both rivers.
    pub const MONUMENT_SURROUNDINGS: Self = Self::of(&[
        Biome::Ocean,
        Biome::River,
        Biome::FrozenOcean,
        Biome::FrozenRiver,
        Biome::DeepOcean,
        Biome::WarmOcean,
        Biome::LukewarmOcean,
        Biome::ColdOcean,
        Biome::DeepWarmOcean,
        Biome::DeepLukewarmOcean,
        Biome::DeepColdOcean,
        Biome::DeepFrozenOcean,
    ]);

    /// Builds a mask from a list of biomes.
    #[must_use]
    pub const fn of(biomes: &[Biome]) -> Self {
        let mut mask = Self::EMPTY;
        let mut i = 0;
        while i < biomes.len() {
            mask = mask.with(biomes[i]);
            i += 1;
        }
        mask
    }

    /// Adds one biome.
    #[must_use]
    pub const fn with(self, biome: Biome) -> Self {
        let id = biome.id();
        if id < 64 {
            Self {
                low: self.low | (1 << id),
                high: self.high,
            }
        } else {
            Self {
                low: self.low,
                high: self.high | (1 << (id - 128)),
            }
        }
    }

    /// Tests membership.
    #[inline]
    #[must_use]
    pub const fn contains(self, biome: Biome) -> bool {
        let id = biome.id();
        if id < 64 {
            self.low & (1 << id) != 0
        } else {
            self.high & (1 << (id - 128)) != 0
        }
    }

    /// The raw `(low, high)` bit words.
    #[must_use]
    pub const fn bits(self) -> (u64, u64) {
        (self.low, self.high)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_round_trip() {
        for biome in Biome::ALL {
            assert_eq!(Biome::from_id(biome.id()), Some(biome));
            assert_eq!(biome.name().parse::<Biome>(), Ok(biome));
            assert_eq!(Biome::try_from(biome.id()), Ok(biome));
        }
        assert_eq!(Biome::from_id(8), None, "nether ids are not overworld biomes");
        assert_eq!(Biome::try_from(255), Err(ProceduralError::UnknownBiomeId(255)));
    }

    #[test]
    fn test_classic_ids() {
        assert_eq!(Biome::Ocean.id(), 0);
        assert_eq!(Biome::MushroomFields.id(), 14);
        assert_eq!(Biome::DeepWarmOcean.id(), 47);
        assert_eq!(Biome::Meadow.id(), 177);
        assert_eq!(Biome::MangroveSwamp.id(), 184);
    }

    #[test]
    fn test_parse_accepts_resource_names() {
        assert_eq!("minecraft:deep_dark".parse::<Biome>(), Ok(Biome::DeepDark));
        assert_eq!("Snowy Plains".parse::<Biome>(), Ok(Biome::SnowyPlains));
        assert!("nether_wastes".parse::<Biome>().is_err());
    }

    #[test]
    fn test_ocean_predicates() {
        let oceans: Vec<Biome> = Biome::ALL.into_iter().filter(|b| b.is_oceanic()).collect();
        assert_eq!(oceans.len(), 10);
        assert!(Biome::DeepColdOcean.is_deep_ocean());
        assert!(!Biome::ColdOcean.is_deep_ocean());
        assert!(Biome::ColdOcean.is_shallow_ocean());
        assert!(!Biome::River.is_oceanic());
        assert!(Biome::LushCaves.is_underground());
    }

    #[test]
    fn test_mask_membership() {
        let mask = BiomeMask::MONUMENT_SURROUNDINGS;
        assert_eq!(mask.bits(), (2_234_207_644_421_249, 0));
        assert!(mask.contains(Biome::FrozenRiver));
        assert!(!mask.contains(Biome::Beach));

        let high = BiomeMask::of(&[Biome::Meadow, Biome::Plains]);
        assert!(high.contains(Biome::Meadow));
        assert!(high.contains(Biome::Plains));
        assert!(!high.contains(Biome::Grove));
        assert_eq!(high.bits(), (1 << 1, 1 << (177 - 128)));
    }
}
