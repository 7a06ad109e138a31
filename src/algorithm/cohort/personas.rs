//! Time-series personas for the lab study
//!
//! Each participant plays one game per disorder. A game is a single profile
//! revealed over three rounds, and each game is played on a different
//! website, so a participant sees at most three disorders.

use arrow::record_batch::RecordBatch;
use arrow_schema::FieldRef;
use itertools::Itertools;
use rand::Rng;
use serde::{Deserialize, Serialize};
use serde_arrow::schema::{SchemaLike, TracingOptions};
use smallvec::SmallVec;
use std::fmt;

use super::{noisy_count, split_even};
use crate::algorithm::profile::ProfileAssembler;
use crate::config::CohortConfig;
use crate::error::{PhenoError, Result};
use crate::utils::logging::{create_main_progress_bar, finish_progress_bar};

/// Number of rounds a game is revealed over
pub const ROUNDS_PER_GAME: usize = 3;

/// Websites a lab-study game can be played on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Website {
    /// The peer-matching prototype
    PeerMatching = 0,
    /// maladyHelp
    MaladyHelp = 1,
    /// Google custom search
    GoogleCustom = 2,
}

impl Website {
    /// Convert a website code to a `Website`
    #[must_use]
    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::PeerMatching),
            1 => Some(Self::MaladyHelp),
            2 => Some(Self::GoogleCustom),
            _ => None,
        }
    }

    /// The numeric code used in datasets
    #[must_use]
    pub const fn code(self) -> u8 {
        self as u8
    }
}

impl fmt::Display for Website {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::PeerMatching => "Peer Matching",
            Self::MaladyHelp => "maladyHelp",
            Self::GoogleCustom => "Google Custom",
        };
        f.write_str(name)
    }
}

/// Order in which a participant visits the three websites
///
/// Participants cycle through five of the six orderings of `[0, 1, 2]`, taken
/// in lexicographic order starting from index `(participant + 1) % 5`.
#[must_use]
pub fn website_order(participant: usize) -> SmallVec<[u8; 3]> {
    let index = (participant + 1) % 5;
    (0..ROUNDS_PER_GAME as u8)
        .permutations(ROUNDS_PER_GAME)
        .nth(index)
        .map(SmallVec::from_vec)
        .unwrap_or_default()
}

/// One lab-study game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonaGame {
    /// Participant playing the game
    pub participant_id: u64,
    /// Position of the game within the participant's session
    pub game_id: u64,
    /// Disorder the case was drawn from
    pub disorder: String,
    /// Website code the game is played on
    pub website_choice: u8,
    /// Phenotypes revealed in the first round
    pub round_1: String,
    /// Phenotypes revealed in the second round
    pub round_2: String,
    /// Phenotypes revealed in the third round
    pub round_3: String,
}

/// All games generated for a lab study
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PersonaDataset {
    /// Games ordered by participant, then game
    pub games: Vec<PersonaGame>,
}

impl PersonaDataset {
    /// Number of games
    #[must_use]
    pub fn len(&self) -> usize {
        self.games.len()
    }

    /// Whether no games were generated
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }

    /// Convert the games to an Arrow record batch
    pub fn to_record_batch(&self) -> Result<RecordBatch> {
        let fields = Vec::<FieldRef>::from_type::<PersonaGame>(TracingOptions::default())?;
        Ok(serde_arrow::to_record_batch(&fields, &self.games)?)
    }
}

/// Generate the lab-study persona dataset
///
/// The phenotype budget is perturbed once for the whole run. Every participant
/// then plays one game per disorder, in the given order.
///
/// # Errors
/// Returns a `Config` error when more disorders are given than there are
/// websites, and `UnknownDisorder` when a disorder is not in the catalog.
pub fn generate_timeseries_personas<R>(
    assembler: &ProfileAssembler<'_>,
    disorders: &[String],
    total_phenotypes: usize,
    participants: usize,
    config: &CohortConfig,
    rng: &mut R,
) -> Result<PersonaDataset>
where
    R: Rng + ?Sized,
{
    if disorders.len() > ROUNDS_PER_GAME {
        return Err(PhenoError::Config(format!(
            "a participant plays one game per website, so at most {ROUNDS_PER_GAME} disorders are allowed (got {})",
            disorders.len()
        )));
    }

    let budget = noisy_count(total_phenotypes, config.phenotype_noise_ratio, rng)?;
    log::info!(
        "Generating personas for {participants} participants over {} disorders with {budget} phenotypes each",
        disorders.len()
    );

    let progress = if config.show_progress {
        create_main_progress_bar(participants as u64, Some("Generating personas"))
    } else {
        indicatif::ProgressBar::hidden()
    };

    let mut games = Vec::with_capacity(participants * disorders.len());
    for participant in 0..participants {
        let websites = website_order(participant);

        for (game_id, disorder) in disorders.iter().enumerate() {
            let profile = assembler.assemble(disorder, budget, Vec::new(), rng)?;
            let entries = profile.into_vec();
            let mut rounds = split_even(&entries, ROUNDS_PER_GAME)
                .into_iter()
                .map(|round| round.join(", "));

            games.push(PersonaGame {
                participant_id: participant as u64,
                game_id: game_id as u64,
                disorder: disorder.clone(),
                website_choice: websites[game_id],
                round_1: rounds.next().unwrap_or_default(),
                round_2: rounds.next().unwrap_or_default(),
                round_3: rounds.next().unwrap_or_default(),
            });
        }
        progress.inc(1);
    }

    finish_progress_bar(&progress, Some("Personas generated"));
    log::info!("Generated {} persona games", games.len());
    Ok(PersonaDataset { games })
}
