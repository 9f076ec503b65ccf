//! Category knowledge base
//!
//! Curated keyword lists and descriptions keyed by a canonical category name.
//! The built-in tables cover the marketplace's standard categories; deployments
//! can load their own from JSON.

use itemcat_core::Result;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;

/// A curated entry for one canonical category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KnowledgeEntry {
    pub canonical_name: String,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub description: String,
}

impl KnowledgeEntry {
    pub fn new(canonical_name: &str, keywords: &[&str], description: &str) -> Self {
        Self {
            canonical_name: canonical_name.to_string(),
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
            description: description.to_string(),
        }
    }
}

/// Ordered, immutable set of knowledge entries
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KnowledgeBase {
    entries: Vec<KnowledgeEntry>,
}

static BUILTIN: Lazy<Arc<KnowledgeBase>> =
    Lazy::new(|| Arc::new(KnowledgeBase::from_entries(builtin_entries())));

impl KnowledgeBase {
    /// The built-in marketplace tables, shared for the life of the process
    pub fn builtin() -> Arc<KnowledgeBase> {
        BUILTIN.clone()
    }

    pub fn from_entries(entries: Vec<KnowledgeEntry>) -> Self {
        Self { entries }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    #[inline]
    pub fn entries(&self) -> &[KnowledgeEntry] {
        &self.entries
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Exact, case-sensitive lookup by canonical name
    pub fn get(&self, canonical_name: &str) -> Option<&KnowledgeEntry> {
        self.entries.iter().find(|e| e.canonical_name == canonical_name)
    }

    /// Entry whose canonical name has the highest word-set Jaccard similarity
    /// to `name`; the earliest entry wins ties. `None` if nothing overlaps.
    pub fn closest(&self, name: &str) -> Option<(&KnowledgeEntry, f32)> {
        let mut best: Option<(&KnowledgeEntry, f32)> = None;
        for entry in &self.entries {
            let similarity = name_overlap(name, &entry.canonical_name);
            if similarity > best.map(|(_, s)| s).unwrap_or(0.0) {
                best = Some((entry, similarity));
            }
        }
        best
    }
}

/// Jaccard similarity between lower-cased whitespace word sets; 0 if either is empty
pub fn name_overlap(a: &str, b: &str) -> f32 {
    let words_a: HashSet<String> = a.split_whitespace().map(|s| s.to_lowercase()).collect();
    let words_b: HashSet<String> = b.split_whitespace().map(|s| s.to_lowercase()).collect();

    if words_a.is_empty() || words_b.is_empty() {
        return 0.0;
    }

    let intersection = words_a.intersection(&words_b).count();
    let union = words_a.union(&words_b).count();

    intersection as f32 / union as f32
}

fn builtin_entries() -> Vec<KnowledgeEntry> {
    vec![
        KnowledgeEntry::new(
            "Electronics & Gadgets",
            &[
                "laptop", "phone", "smartphone", "headphone", "earphone", "tablet", "charger",
                "adapter", "speaker", "mouse", "keyboard", "monitor", "camera", "gadget", "cable",
                "electronic", "tech", "computer", "pc", "device", "calculator", "watch", "smart",
                "digital", "gaming", "console", "playstation", "xbox", "nintendo", "power bank",
                "calculator", "electric", "kettle", "VR",
            ],
            "Electronic devices and gadgets including laptops, phones, headphones, tablets, and tech accessories",
        ),
        KnowledgeEntry::new(
            "Kitchen & Cooking",
            &[
                "pot", "pan", "plate", "bowl", "knife", "fork", "spoon", "mug", "cup", "microwave",
                "refrigerator", "fridge", "kettle", "blender", "mixer", "toaster", "cooker",
                "utensil", "cookware", "kitchen", "cooking", "spatula", "container", "storage",
                "coffee", "tea", "bottle", "jar", "food", "appliance", "gas", "stove", "dish",
                "cutlery", "cup", "peanut", "butter",
            ],
            "Kitchen items and cooking supplies for preparing and storing food",
        ),
        KnowledgeEntry::new(
            "Books & Study Materials",
            &[
                "book", "textbook", "novel", "study", "note", "notebook", "pen", "pencil",
                "highlighter", "stationery", "paper", "binder", "folder", "calculator", "academic",
                "course", "semester", "subject", "guide", "manual", "reference", "dictionary",
                "journal", "magazine", "reading", "literature", "fiction", "nonfiction",
                "educational", "learning", "chem", "bio", "dbms", "math", "phy", "history",
                "geography", "english", "language", "grammar", "vocabulary", "text",
                "study material",
            ],
            "Books, textbooks, and study materials for academic courses and reading",
        ),
        KnowledgeEntry::new(
            "Sports & Fitness Gear",
            &[
                "sport", "fitness", "exercise", "gym", "workout", "ball", "bat", "racket", "yoga",
                "mat", "weight", "dumbbell", "running", "shoe", "bicycle", "bike", "cricket",
                "football", "soccer", "basketball", "volleyball", "badminton", "tennis",
                "athletic", "train", "cardio", "jersey", "shorts", "track", "equipment",
                "swimming", "sports",
            ],
            "Sports equipment and fitness gear for physical activities and exercise",
        ),
        KnowledgeEntry::new(
            "Musical Instruments",
            &[
                "guitar", "piano", "keyboard", "drum", "violin", "flute", "ukulele", "bass",
                "instrument", "musical", "music", "play", "song", "sound", "audio", "amplifier",
                "speaker", "headphone", "microphone", "record", "musician", "band", "orchestra",
                "string", "electric", "acoustic", "capo", "tuner", "pick", "bow", "saxophone",
                "trumpet", "harmonica",
            ],
            "Musical instruments and related equipment for playing and learning music",
        ),
        KnowledgeEntry::new(
            "Dorm & Bedroom Essentials",
            &[
                "bed", "mattress", "pillow", "sheet", "blanket", "duvet", "comforter", "bedding",
                "curtain", "lamp", "desk", "chair", "mirror", "storage", "box", "organizer",
                "hanger", "rack", "dorm", "room", "sleep", "night", "alarm", "clock", "fan",
                "heater", "hostel", "dorm", "bedroom", "essential", "cooler", "tray", "bean bag",
            ],
            "Essential items for dorm rooms and bedrooms such as bedding, storage, and comfort items",
        ),
        KnowledgeEntry::new(
            "Room Decor",
            &[
                "decor", "decoration", "poster", "frame", "light", "lamp", "plant", "flower",
                "wall", "art", "picture", "photo", "cushion", "pillow", "rug", "carpet", "curtain",
                "blind", "fairy", "string", "led", "strip", "ornament", "figurine", "statue",
                "candle", "vase", "decorative", "aesthetic", "tapestry", "flag", "banner", "disco",
            ],
            "Decorative items to personalize and beautify living spaces",
        ),
        KnowledgeEntry::new(
            "Community & Shared Resources",
            &[
                "community", "shared", "common", "resource", "board", "game", "card", "puzzle",
                "dvd", "movie", "book", "magazine", "tool", "equipment", "party", "event",
                "activity", "group", "social", "communal", "utility", "public", "collective",
                "share", "borrow", "lend", "temporary", "club", "society", "organization",
                "gathering",
            ],
            "Items intended for shared or communal use among multiple students",
        ),
        KnowledgeEntry::new(
            "Digital Subscriptions & Accounts",
            &[
                "subscription", "account", "digital", "online", "service", "streaming", "netflix",
                "amazon", "prime", "spotify", "apple", "music", "platform", "membership",
                "premium", "access", "login", "credential", "password", "wifi", "internet",
                "cloud", "storage", "software", "license", "code", "key", "activation",
                "download", "virtual", "game", "gaming",
            ],
            "Digital accounts, subscription services, and online platform memberships",
        ),
        KnowledgeEntry::new(
            "Others",
            &[],
            "Miscellaneous items that don't fit into other categories",
        ),
    ]
}
