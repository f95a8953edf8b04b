use crate::domain::model::{
    IdStrategy, MarkdownSection, MetadataDefaults, Profile, ProfileMetadata,
};
use regex::Regex;

/// `profile-<prefix>-<nnn>`; the sequence is padded to three digits and grows past them.
pub fn format_profile_id(prefix: &str, sequence: u32) -> String {
    format!("profile-{}-{:03}", prefix, sequence)
}

/// Highest sequence number among `ids` that follow the `profile-<prefix>-<digits>` shape.
pub fn highest_sequence<'a, I>(prefix: &str, ids: I) -> Option<u32>
where
    I: IntoIterator<Item = &'a str>,
{
    let pattern = format!(r"^profile-{}-(\d+)$", regex::escape(prefix));
    let re = Regex::new(&pattern).ok()?;

    ids.into_iter()
        .filter_map(|id| re.captures(id))
        .filter_map(|caps| caps[1].parse::<u32>().ok())
        .max()
}

/// Hands out sequential profile ids for one dataset.
#[derive(Debug, Clone)]
pub struct IdAllocator {
    prefix: String,
    next: u32,
}

impl IdAllocator {
    pub fn new(prefix: &str, start_id: u32) -> Self {
        Self {
            prefix: prefix.to_string(),
            next: start_id,
        }
    }

    /// Picks the first sequence number according to `strategy` and the ids
    /// already present in the dataset.
    pub fn for_dataset<'a, I>(prefix: &str, start_id: u32, strategy: IdStrategy, existing: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let start = match strategy {
            IdStrategy::Fixed => start_id,
            IdStrategy::ContinueExisting => match highest_sequence(prefix, existing) {
                Some(highest) => start_id.max(highest.saturating_add(1)),
                None => start_id,
            },
        };
        Self::new(prefix, start)
    }

    pub fn next_id(&mut self) -> String {
        let id = format_profile_id(&self.prefix, self.next);
        self.next = self.next.saturating_add(1);
        id
    }
}

pub struct ProfileGenerator;

impl ProfileGenerator {
    pub fn create_profile(
        profile_id: String,
        title: String,
        clues: Vec<String>,
        language: &str,
        category: &str,
        metadata: &MetadataDefaults,
    ) -> Profile {
        Profile {
            id: profile_id,
            category: category.to_string(),
            name: title,
            clues,
            metadata: ProfileMetadata {
                language: language.to_string(),
                difficulty: metadata.difficulty.clone(),
                source: metadata.source.clone(),
            },
        }
    }

    /// Converts parsed sections to profiles, in order, drawing ids from `ids`.
    pub fn from_sections(
        sections: Vec<MarkdownSection>,
        ids: &mut IdAllocator,
        language: &str,
        category: &str,
        metadata: &MetadataDefaults,
    ) -> Vec<Profile> {
        sections
            .into_iter()
            .map(|section| {
                Self::create_profile(
                    ids.next_id(),
                    section.title,
                    section.clues,
                    language,
                    category,
                    metadata,
                )
            })
            .collect()
    }
}
