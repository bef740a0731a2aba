use serde::{Deserialize, Serialize};
pub use solo_score::progression::{Difficulty, Mode};

/// Built-in lesson content, bundled at compile time.
const BUILTIN_CATALOG: &str = include_str!("../../content/catalog.json");

/// Number of items in one practice task.
pub const TASK_SIZE: usize = 10;

/// Speaker of a dialogue line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Speaker {
    A,
    B,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialogueLine {
    pub speaker: Speaker,
    pub text: String,
}

/// A single phrase to repeat
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Phrase {
    pub id: u32,
    /// Text shown to the player
    pub text: String,
    pub expected_transcript: String,
    pub translation: String,
}

/// A short exchange; the player says the opening line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dialogue {
    pub id: u32,
    pub dialogue: Vec<DialogueLine>,
    pub expected_transcript: String,
    pub translation: String,
}

/// Anything the player can be asked to say
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GameContent {
    Phrase(Phrase),
    Dialogue(Dialogue),
}

impl GameContent {
    pub fn id(&self) -> u32 {
        match self {
            Self::Phrase(p) => p.id,
            Self::Dialogue(d) => d.id,
        }
    }

    /// The transcript an attempt is scored against
    pub fn expected_transcript(&self) -> &str {
        match self {
            Self::Phrase(p) => &p.expected_transcript,
            Self::Dialogue(d) => &d.expected_transcript,
        }
    }
}

#[derive(Deserialize)]
struct RawCatalog {
    easy_phrases: Vec<Phrase>,
    medium_phrases: Vec<Phrase>,
    advanced_dialogues: Vec<Dialogue>,
}

/// All lesson content, grouped into pools
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    easy_phrases: Vec<GameContent>,
    medium_phrases: Vec<GameContent>,
    advanced_dialogues: Vec<GameContent>,
}

impl Catalog {
    /// Parse the catalog bundled with the binary
    pub fn builtin() -> Result<Self, serde_json::Error> {
        Self::from_json(BUILTIN_CATALOG)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let raw: RawCatalog = serde_json::from_str(json)?;

        Ok(Self {
            easy_phrases: raw.easy_phrases.into_iter().map(GameContent::Phrase).collect(),
            medium_phrases: raw
                .medium_phrases
                .into_iter()
                .map(GameContent::Phrase)
                .collect(),
            advanced_dialogues: raw
                .advanced_dialogues
                .into_iter()
                .map(GameContent::Dialogue)
                .collect(),
        })
    }

    /// Content pool for a mode and difficulty
    ///
    /// Phrase mode draws easy phrases at the easy level and medium phrases
    /// above it. Dialogue mode always draws from the advanced dialogues.
    pub fn pool(&self, mode: Mode, difficulty: Difficulty) -> &[GameContent] {
        match (mode, difficulty) {
            (Mode::Phrases, Difficulty::Easy) => &self.easy_phrases,
            (Mode::Phrases, _) => &self.medium_phrases,
            (Mode::Dialogues, _) => &self.advanced_dialogues,
        }
    }

    /// Content graded at a difficulty, regardless of mode
    pub fn by_difficulty(&self, difficulty: Difficulty) -> &[GameContent] {
        match difficulty {
            Difficulty::Easy => &self.easy_phrases,
            Difficulty::Medium => &self.medium_phrases,
            Difficulty::Advanced => &self.advanced_dialogues,
        }
    }

    /// Every item in the catalog
    pub fn all(&self) -> impl Iterator<Item = &GameContent> {
        self.easy_phrases
            .iter()
            .chain(&self.medium_phrases)
            .chain(&self.advanced_dialogues)
    }

    pub fn get(&self, mode: Mode, difficulty: Difficulty, id: u32) -> Option<&GameContent> {
        self.pool(mode, difficulty).iter().find(|c| c.id() == id)
    }

    /// The [`TASK_SIZE`] items of a 1-based task
    ///
    /// Tasks walk the pool in order and wrap around once it is exhausted.
    /// Returns `None` for task 0.
    pub fn task(&self, mode: Mode, difficulty: Difficulty, task_id: u32) -> Option<Vec<&GameContent>> {
        let pool = self.pool(mode, difficulty);
        let first = (task_id.checked_sub(1)? as usize).checked_mul(TASK_SIZE)?;

        if pool.is_empty() {
            return Some(Vec::new());
        }

        Some(
            (0..TASK_SIZE)
                .map(|i| &pool[(first + i) % pool.len()])
                .collect(),
        )
    }
}
