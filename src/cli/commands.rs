use std::path::PathBuf;

use clap::Subcommand;

#[derive(Subcommand)]
pub enum TeamCommands {
    /// Import teams from an event API JSON payload (replaces the team list)
    Import {
        /// JSON file containing a "teams" array
        file: PathBuf,
    },

    /// List all teams
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show one team
    Show {
        team: u32,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Search teams by number or nickname
    Search {
        query: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand)]
pub enum MatchCommands {
    /// Add a scheduled match
    Add {
        /// Match number
        number: u32,

        /// Red alliance team numbers, comma separated
        #[arg(long, value_delimiter = ',', num_args = 1..)]
        red: Vec<u32>,

        /// Blue alliance team numbers, comma separated
        #[arg(long, value_delimiter = ',', num_args = 1..)]
        blue: Vec<u32>,

        /// Competition level (practice, qualification, playoff)
        #[arg(long, default_value = "qualification")]
        level: String,
    },

    /// List matches in order
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Remove a match and everything recorded about it
    Remove {
        number: u32,

        /// Skip confirmation
        #[arg(long, short)]
        yes: bool,

        /// Skip interactive prompts (requires --yes)
        #[arg(long)]
        non_interactive: bool,
    },

    /// Record final alliance totals
    Result {
        number: u32,

        /// Red alliance total
        #[arg(long)]
        red: u32,

        /// Blue alliance total
        #[arg(long)]
        blue: u32,
    },

    /// Save alliance quick scores and the result they imply
    Score {
        number: u32,

        /// Red alliance action, as phase.action=value (repeatable)
        #[arg(long = "red")]
        red: Vec<String>,

        /// Blue alliance action, as phase.action=value (repeatable)
        #[arg(long = "blue")]
        blue: Vec<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the current and next scheduled match
    Status {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand)]
pub enum ScoutCommands {
    /// Record one robot's performance in one match
    Add {
        /// Team number
        team: u32,

        /// Match number
        #[arg(long = "match")]
        match_number: u32,

        /// Autonomous action, as action=value (repeatable)
        #[arg(long)]
        auto: Vec<String>,

        /// Teleop action, as action=value (repeatable)
        #[arg(long)]
        teleop: Vec<String>,

        /// Endgame action, as action=value (repeatable)
        #[arg(long)]
        endgame: Vec<String>,

        /// Free-text notes
        #[arg(long, default_value = "")]
        notes: String,
    },

    /// List scouting entries
    List {
        /// Only entries for this team
        #[arg(long)]
        team: Option<u32>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand)]
pub enum StatsCommands {
    /// Averages, win rate and per-match points for a team
    Team {
        team: u32,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Event-wide summary
    Dashboard {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand)]
pub enum HeatmapCommands {
    /// Record points for a team and phase, appended to what is stored
    Record {
        team: u32,

        /// Match phase (auto, teleop, endgame)
        phase: String,

        /// Field position as x,y (repeatable)
        #[arg(long = "point", required = true)]
        points: Vec<String>,

        /// Use the team-strategy heatmaps instead of the analysis heatmaps
        #[arg(long)]
        strategy: bool,
    },

    /// Show stored points
    Show {
        team: u32,

        /// Only this phase
        #[arg(long)]
        phase: Option<String>,

        /// Use the team-strategy heatmaps instead of the analysis heatmaps
        #[arg(long)]
        strategy: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Clear one phase for a team
    Clear {
        team: u32,

        /// Match phase (auto, teleop, endgame)
        phase: String,

        /// Use the team-strategy heatmaps instead of the analysis heatmaps
        #[arg(long)]
        strategy: bool,

        /// Skip confirmation
        #[arg(long, short)]
        yes: bool,

        /// Skip interactive prompts (requires --yes)
        #[arg(long)]
        non_interactive: bool,
    },
}

#[derive(Subcommand)]
pub enum StrategyCommands {
    /// Show a team's strategy profile
    Show {
        team: u32,

        /// Use the 1-5 per-team profile instead of the 0-10 planning profile
        #[arg(long)]
        per_team: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Set a capability rating (clamped to the axis range)
    Set {
        team: u32,
        axis: String,
        value: i32,

        /// Use the 1-5 per-team profile instead of the 0-10 planning profile
        #[arg(long)]
        per_team: bool,
    },

    /// Append to strengths, weaknesses or recommendations
    Add {
        team: u32,
        list: String,
        text: String,

        /// Use the 1-5 per-team profile instead of the 0-10 planning profile
        #[arg(long)]
        per_team: bool,
    },

    /// Replace a list item
    Edit {
        team: u32,
        list: String,
        index: usize,
        text: String,

        /// Use the 1-5 per-team profile instead of the 0-10 planning profile
        #[arg(long)]
        per_team: bool,
    },

    /// Remove a list item
    Remove {
        team: u32,
        list: String,
        index: usize,

        /// Use the 1-5 per-team profile instead of the 0-10 planning profile
        #[arg(long)]
        per_team: bool,
    },

    /// Replace the profile's free-text notes
    Notes {
        team: u32,
        text: String,

        /// Use the 1-5 per-team profile instead of the 0-10 planning profile
        #[arg(long)]
        per_team: bool,
    },

    /// Compare two teams axis by axis
    Compare {
        team_a: u32,
        team_b: u32,

        /// Use the 1-5 per-team profile instead of the 0-10 planning profile
        #[arg(long)]
        per_team: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand)]
pub enum NoteCommands {
    /// Add a note, or a match analysis with --match
    Add {
        team: u32,
        text: String,

        /// Attach the note to a match as analysis
        #[arg(long = "match")]
        match_number: Option<u32>,
    },

    /// List a team's notes and match analyses
    List {
        team: u32,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Replace the text of a note
    Edit { team: u32, id: String, text: String },

    /// Delete a note or analysis
    Delete {
        team: u32,
        id: String,

        /// The id refers to a match analysis
        #[arg(long)]
        analysis: bool,

        /// Skip confirmation
        #[arg(long, short)]
        yes: bool,

        /// Skip interactive prompts (requires --yes)
        #[arg(long)]
        non_interactive: bool,
    },

    /// Write the quick analysis of a whole match
    Review {
        /// Match number
        number: u32,

        /// Notes about the match
        #[arg(long, default_value = "")]
        notes: String,

        /// Team performance as team:auto:teleop:endgame:defense (repeatable)
        #[arg(long = "team")]
        teams: Vec<String>,
    },

    /// Show the quick analysis of a match
    Match {
        number: u32,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand)]
pub enum DataCommands {
    /// Dump every stored key as one JSON document
    Export {
        /// Write to this file instead of stdout
        #[arg(long, short)]
        output: Option<PathBuf>,
    },

    /// Overwrite stored keys from an export file
    Import {
        file: PathBuf,

        /// Skip confirmation
        #[arg(long, short)]
        yes: bool,

        /// Skip interactive prompts (requires --yes)
        #[arg(long)]
        non_interactive: bool,
    },

    /// List stored keys and their sizes
    Inventory {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Delete one stored key
    Delete {
        key: String,

        /// Skip confirmation
        #[arg(long, short)]
        yes: bool,

        /// Skip interactive prompts (requires --yes)
        #[arg(long)]
        non_interactive: bool,
    },

    /// Delete all data except settings
    Clear {
        /// Skip confirmation
        #[arg(long, short)]
        yes: bool,

        /// Skip interactive prompts (requires --yes)
        #[arg(long)]
        non_interactive: bool,
    },
}

#[derive(Subcommand)]
pub enum SettingsCommands {
    /// Show current settings
    Show {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Change one setting
    Set { name: String, value: String },
}
