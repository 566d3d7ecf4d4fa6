//! Place names for labeled regions.
//!
//! Labeling only needs a `RegionNamer`; any `FnMut(RegionKind) -> String`
//! qualifies, which keeps tests free of word banks. `PlaceNameGenerator` is
//! the seeded default, combining per-kind adjectives and synonyms with a
//! shared pool of nouns through a handful of weighted patterns.

use rand::distributions::{Distribution, WeightedIndex};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::regions::RegionKind;

/// Produces the display text for one label.
pub trait RegionNamer {
    fn generate_region_name(&mut self, kind: RegionKind) -> String;
}

impl<F> RegionNamer for F
where
    F: FnMut(RegionKind) -> String,
{
    fn generate_region_name(&mut self, kind: RegionKind) -> String {
        self(kind)
    }
}

const COMMON_ADJECTIVES: &[&str] = &[
    "Ancient", "Cursed", "Elder", "Fabled", "Forgotten", "Hallowed", "Haunted", "Hidden", "Lost", "Nameless",
    "Sacred", "Silent", "Sundered", "Veiled",
];

const FOREST_ADJECTIVES: &[&str] = &[
    "Ashen", "Blighted", "Briar", "Deep", "Dim", "Emerald", "Gloaming", "Green", "Hollow", "Mossy", "Moonlit",
    "Murky", "Old", "Shadowed", "Tangled", "Thorny", "Twisted", "Verdant", "Weeping", "Whispering", "Wild",
];

const FOREST_SYNONYMS: &[&str] = &[
    "Forest", "Woods", "Wood", "Woodland", "Grove", "Thicket", "Copse", "Weald", "Holt", "Greenwood", "Wildwood",
    "Glade", "Tangle",
];

const DESERT_ADJECTIVES: &[&str] = &[
    "Arid", "Barren", "Blazing", "Bleak", "Burning", "Cracked", "Crimson", "Desolate", "Endless", "Golden",
    "Parched", "Scorched", "Shimmering", "Sunbaked", "Vast", "Windswept",
];

const DESERT_SYNONYMS: &[&str] = &[
    "Desert", "Wastes", "Sands", "Dunes", "Barrens", "Badlands", "Expanse", "Reaches", "Dustlands", "Flats",
    "Erg", "Drylands",
];

const OCEAN_ADJECTIVES: &[&str] = &[
    "Azure", "Boundless", "Churning", "Cold", "Dark", "Endless", "Foaming", "Grey", "Howling", "Restless",
    "Sapphire", "Stormy", "Sunlit", "Tempestuous", "Wine-Dark",
];

const OCEAN_SYNONYMS: &[&str] = &[
    "Ocean", "Sea", "Deeps", "Depths", "Gulf", "Sound", "Strait", "Main", "Brine", "Fathoms", "Expanse",
];

const LAKE_ADJECTIVES: &[&str] = &[
    "Blue", "Calm", "Clear", "Glassy", "Mirror", "Misty", "Placid", "Quiet", "Reedy", "Silver", "Still",
    "Tranquil",
];

const LAKE_SYNONYMS: &[&str] = &["Lake", "Mere", "Pool", "Loch", "Tarn", "Lagoon", "Basin", "Waters"];

const NOUNS: &[&str] = &[
    "Bear", "Bone", "Crow", "Dawn", "Dragon", "Dream", "Dusk", "Ember", "Fang", "Giant", "Ghost", "Hawk", "Hope",
    "King", "Lantern", "Moon", "Oak", "Owl", "Queen", "Raven", "Serpent", "Shadow", "Skull", "Star", "Storm",
    "Thorn", "Troll", "Wind", "Witch", "Wolf", "Wyrm",
];

/// Name shapes, with relative weights.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Pattern {
    /// "Mossy Grove"
    AdjSyn,
    /// "The Mossy Grove"
    TheAdjSyn,
    /// "Grove of the Owl"
    SynOfNoun,
    /// "The Grove of the Mossy Owl"
    TheSynOfAdjNoun,
    /// "Owl-grove"
    NounHyphenSyn,
    /// "Mossy-grove"
    AdjHyphenSyn,
}

const PATTERNS: [(Pattern, u32); 6] = [
    (Pattern::AdjSyn, 30),
    (Pattern::TheAdjSyn, 20),
    (Pattern::SynOfNoun, 30),
    (Pattern::TheSynOfAdjNoun, 10),
    (Pattern::NounHyphenSyn, 5),
    (Pattern::AdjHyphenSyn, 5),
];

fn word_banks(kind: RegionKind) -> (&'static [&'static str], &'static [&'static str]) {
    match kind {
        RegionKind::Forest => (FOREST_ADJECTIVES, FOREST_SYNONYMS),
        RegionKind::Desert => (DESERT_ADJECTIVES, DESERT_SYNONYMS),
        RegionKind::Ocean => (OCEAN_ADJECTIVES, OCEAN_SYNONYMS),
        RegionKind::Lake => (LAKE_ADJECTIVES, LAKE_SYNONYMS),
    }
}

fn pick<'a>(words: &[&'a str], rng: &mut impl Rng) -> &'a str {
    words[rng.gen_range(0..words.len())]
}

/// Seeded fantasy place-name generator.
pub struct PlaceNameGenerator {
    rng: ChaCha8Rng,
}

impl PlaceNameGenerator {
    pub fn new(seed: u64) -> Self {
        Self::from_rng(ChaCha8Rng::seed_from_u64(seed))
    }

    pub fn from_rng(rng: ChaCha8Rng) -> Self {
        Self { rng }
    }

    /// One name for a region of `kind`.
    pub fn place_name(&mut self, kind: RegionKind) -> String {
        let (kind_adjectives, synonyms) = word_banks(kind);
        let pattern = match WeightedIndex::new(PATTERNS.iter().map(|(_, w)| *w)) {
            Ok(weights) => PATTERNS[weights.sample(&mut self.rng)].0,
            Err(_) => Pattern::TheAdjSyn,
        };

        // Half the time draw from the shared adjectives instead
        let adjectives = if self.rng.gen_bool(0.5) {
            kind_adjectives
        } else {
            COMMON_ADJECTIVES
        };
        let adj = pick(adjectives, &mut self.rng);
        let syn = pick(synonyms, &mut self.rng);
        let noun = pick(NOUNS, &mut self.rng);

        match pattern {
            Pattern::AdjSyn => format!("{} {}", adj, syn),
            Pattern::TheAdjSyn => format!("The {} {}", adj, syn),
            Pattern::SynOfNoun => format!("{} of the {}", syn, noun),
            Pattern::TheSynOfAdjNoun => format!("The {} of the {} {}", syn, adj, noun),
            Pattern::NounHyphenSyn => format!("{}-{}", noun, syn.to_lowercase()),
            Pattern::AdjHyphenSyn => format!("{}-{}", adj, syn.to_lowercase()),
        }
    }
}

impl RegionNamer for PlaceNameGenerator {
    fn generate_region_name(&mut self, kind: RegionKind) -> String {
        self.place_name(kind)
    }
}
