// Fixed demo data used by the seed reset

use crate::entry::{EntryFields, EntryMeta, NewEntry};

/// Number of entries in the seed set
pub const SEED_COUNT: usize = 5;

fn seed(
    strain: &str,
    kind: &str,
    amount: &str,
    consumption: &str,
    description: &str,
    tags: &[&str],
    meta: EntryMeta,
) -> NewEntry {
    NewEntry::new(EntryFields {
        strain: strain.to_string(),
        kind: kind.to_string(),
        amount: amount.to_string(),
        consumption: consumption.to_string(),
        description: description.to_string(),
        tags: tags.iter().map(|t| t.to_string()).collect(),
    })
    .with_meta(meta)
}

/// The seed set, in display order
pub fn seed_entries() -> Vec<NewEntry> {
    vec![
        seed(
            "Blue Dream",
            "flower",
            "1g",
            "vaporized",
            "Smooth and uplifting, good for a slow evening.",
            &["sativa-dominant", "evening"],
            EntryMeta {
                votes: 4,
                favorites: 2,
            },
        ),
        seed(
            "Granddaddy Purple",
            "flower",
            "0.5g",
            "smoked",
            "Heavy body effect, straight to sleep.",
            &["indica", "sleep"],
            EntryMeta {
                votes: 2,
                favorites: 1,
            },
        ),
        seed(
            "Sour Diesel",
            "pre-roll",
            "1 joint",
            "smoked",
            "Energetic, a little racy on an empty stomach.",
            &["sativa", "daytime"],
            EntryMeta {
                votes: 1,
                favorites: 0,
            },
        ),
        seed(
            "Gelato",
            "edible",
            "10mg",
            "eaten",
            "Took about an hour to kick in. Mellow.",
            &["hybrid", "edible"],
            EntryMeta::default(),
        ),
        seed(
            "Harlequin",
            "tincture",
            "0.25ml",
            "sublingual",
            "High CBD, clear headed, helped with back pain.",
            &["cbd", "pain"],
            EntryMeta {
                votes: 3,
                favorites: 3,
            },
        ),
    ]
}
