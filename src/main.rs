use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use scoutbook::cli::{
    DataCommands, HeatmapCommands, MatchCommands, NoteCommands, ScoutCommands, ScoutInput,
    SettingsCommands, StatsCommands, StrategyCommands, StrategyEdit, TeamCommands,
};
use scoutbook::error::Error;

#[derive(Parser)]
#[command(name = "scoutbook")]
#[command(about = "Offline scouting and match analytics for robotics competitions", long_about = None)]
struct Cli {
    /// Data directory holding the database and config
    #[arg(long, global = true, default_value = "./data")]
    data_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the data directory, config and database
    Init {
        /// Storage limit in bytes
        #[arg(long)]
        capacity_bytes: Option<u64>,

        /// Ruleset for scouting entries (built-in name or TOML path)
        #[arg(long)]
        scouting_ruleset: Option<String>,

        /// Ruleset for match quick scores (built-in name or TOML path)
        #[arg(long)]
        match_ruleset: Option<String>,
    },

    /// Manage teams
    Team {
        #[command(subcommand)]
        command: TeamCommands,
    },

    /// Manage the match schedule and results
    Match {
        #[command(subcommand)]
        command: MatchCommands,
    },

    /// Record and list scouting entries
    Scout {
        #[command(subcommand)]
        command: ScoutCommands,
    },

    /// Team performance statistics
    Stats {
        #[command(subcommand)]
        command: StatsCommands,
    },

    /// Field position heatmaps
    Heatmap {
        #[command(subcommand)]
        command: HeatmapCommands,
    },

    /// Capability ratings and strategy notes
    Strategy {
        #[command(subcommand)]
        command: StrategyCommands,
    },

    /// Team notes and match analysis
    Note {
        #[command(subcommand)]
        command: NoteCommands,
    },

    /// Export, import and maintain stored data
    Data {
        #[command(subcommand)]
        command: DataCommands,
    },

    /// Show or change settings
    Settings {
        #[command(subcommand)]
        command: SettingsCommands,
    },
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let data_dir = cli.data_dir.as_path();

    match cli.command {
        Commands::Init {
            capacity_bytes,
            scouting_ruleset,
            match_ruleset,
        } => scoutbook::cli::run_init(data_dir, capacity_bytes, scouting_ruleset, match_ruleset),

        Commands::Team { command } => match command {
            TeamCommands::Import { file } => scoutbook::cli::run_team_import(data_dir, &file),
            TeamCommands::List { json } => scoutbook::cli::run_team_list(data_dir, json),
            TeamCommands::Show { team, json } => scoutbook::cli::run_team_show(data_dir, team, json),
            TeamCommands::Search { query, json } => {
                scoutbook::cli::run_team_search(data_dir, &query, json)
            }
        },

        Commands::Match { command } => match command {
            MatchCommands::Add {
                number,
                red,
                blue,
                level,
            } => scoutbook::cli::run_match_add(data_dir, number, &red, &blue, &level),
            MatchCommands::List { json } => scoutbook::cli::run_match_list(data_dir, json),
            MatchCommands::Remove {
                number,
                yes,
                non_interactive,
            } => scoutbook::cli::run_match_remove(data_dir, number, yes, non_interactive),
            MatchCommands::Result { number, red, blue } => {
                scoutbook::cli::run_match_result(data_dir, number, red, blue)
            }
            MatchCommands::Score {
                number,
                red,
                blue,
                json,
            } => scoutbook::cli::run_match_score(data_dir, number, &red, &blue, json),
            MatchCommands::Status { json } => scoutbook::cli::run_match_status(data_dir, json),
        },

        Commands::Scout { command } => match command {
            ScoutCommands::Add {
                team,
                match_number,
                auto,
                teleop,
                endgame,
                notes,
            } => scoutbook::cli::run_scout_add(
                data_dir,
                ScoutInput {
                    team,
                    match_number,
                    auto: &auto,
                    teleop: &teleop,
                    endgame: &endgame,
                    notes,
                },
            ),
            ScoutCommands::List { team, json } => {
                scoutbook::cli::run_scout_list(data_dir, team, json)
            }
        },

        Commands::Stats { command } => match command {
            StatsCommands::Team { team, json } => {
                scoutbook::cli::run_stats_team(data_dir, team, json)
            }
            StatsCommands::Dashboard { json } => {
                scoutbook::cli::run_stats_dashboard(data_dir, json)
            }
        },

        Commands::Heatmap { command } => match command {
            HeatmapCommands::Record {
                team,
                phase,
                points,
                strategy,
            } => scoutbook::cli::run_heatmap_record(data_dir, team, &phase, &points, strategy),
            HeatmapCommands::Show {
                team,
                phase,
                strategy,
                json,
            } => scoutbook::cli::run_heatmap_show(data_dir, team, phase.as_deref(), strategy, json),
            HeatmapCommands::Clear {
                team,
                phase,
                strategy,
                yes,
                non_interactive,
            } => scoutbook::cli::run_heatmap_clear(
                data_dir,
                team,
                &phase,
                strategy,
                yes,
                non_interactive,
            ),
        },

        Commands::Strategy { command } => match command {
            StrategyCommands::Show {
                team,
                per_team,
                json,
            } => scoutbook::cli::run_strategy_show(data_dir, team, per_team, json),
            StrategyCommands::Set {
                team,
                axis,
                value,
                per_team,
            } => scoutbook::cli::run_strategy_set(data_dir, team, &axis, value, per_team),
            StrategyCommands::Add {
                team,
                list,
                text,
                per_team,
            } => scoutbook::cli::run_strategy_edit(
                data_dir,
                team,
                per_team,
                StrategyEdit::Add { list, text },
            ),
            StrategyCommands::Edit {
                team,
                list,
                index,
                text,
                per_team,
            } => scoutbook::cli::run_strategy_edit(
                data_dir,
                team,
                per_team,
                StrategyEdit::Edit { list, index, text },
            ),
            StrategyCommands::Remove {
                team,
                list,
                index,
                per_team,
            } => scoutbook::cli::run_strategy_edit(
                data_dir,
                team,
                per_team,
                StrategyEdit::Remove { list, index },
            ),
            StrategyCommands::Notes {
                team,
                text,
                per_team,
            } => scoutbook::cli::run_strategy_edit(
                data_dir,
                team,
                per_team,
                StrategyEdit::Notes { text },
            ),
            StrategyCommands::Compare {
                team_a,
                team_b,
                per_team,
                json,
            } => scoutbook::cli::run_strategy_compare(data_dir, team_a, team_b, per_team, json),
        },

        Commands::Note { command } => match command {
            NoteCommands::Add {
                team,
                text,
                match_number,
            } => scoutbook::cli::run_note_add(data_dir, team, &text, match_number),
            NoteCommands::List { team, json } => scoutbook::cli::run_note_list(data_dir, team, json),
            NoteCommands::Edit { team, id, text } => {
                scoutbook::cli::run_note_edit(data_dir, team, &id, &text)
            }
            NoteCommands::Delete {
                team,
                id,
                analysis,
                yes,
                non_interactive,
            } => scoutbook::cli::run_note_delete(data_dir, team, &id, analysis, yes, non_interactive),
            NoteCommands::Review {
                number,
                notes,
                teams,
            } => scoutbook::cli::run_note_review(data_dir, number, &notes, &teams),
            NoteCommands::Match { number, json } => {
                scoutbook::cli::run_note_match(data_dir, number, json)
            }
        },

        Commands::Data { command } => match command {
            DataCommands::Export { output } => {
                scoutbook::cli::run_data_export(data_dir, output.as_deref())
            }
            DataCommands::Import {
                file,
                yes,
                non_interactive,
            } => scoutbook::cli::run_data_import(data_dir, &file, yes, non_interactive),
            DataCommands::Inventory { json } => scoutbook::cli::run_data_inventory(data_dir, json),
            DataCommands::Delete {
                key,
                yes,
                non_interactive,
            } => scoutbook::cli::run_data_delete(data_dir, &key, yes, non_interactive),
            DataCommands::Clear {
                yes,
                non_interactive,
            } => scoutbook::cli::run_data_clear(data_dir, yes, non_interactive),
        },

        Commands::Settings { command } => match command {
            SettingsCommands::Show { json } => scoutbook::cli::run_settings_show(data_dir, json),
            SettingsCommands::Set { name, value } => {
                scoutbook::cli::run_settings_set(data_dir, &name, &value)
            }
        },
    }
}

fn main() -> ExitCode {
    let filter = match "scoutbook=info".parse() {
        Ok(directive) => EnvFilter::from_default_env().add_directive(directive),
        Err(_) => EnvFilter::from_default_env(),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            match err.downcast_ref::<Error>() {
                Some(e) => eprintln!("Error ({}): {e}", e.category()),
                None => eprintln!("Error: {err:#}"),
            }
            ExitCode::FAILURE
        }
    }
}
