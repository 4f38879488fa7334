//! Program configurations.

use std::env;

use clap::{Arg, ArgMatches, Command};
use serde::Deserialize;

use devreg_corelib::constants::DbEngine;

/// Configuration file object.
#[derive(Default, Deserialize)]
pub struct Config {
    pub db: Option<Db>,
}

/// Database configuration object.
#[derive(Default, Deserialize)]
pub struct Db {
    /// Select the model implementation.
    /// - `sqlite`: pure SQLite.
    pub engine: Option<String>,
    pub sqlite: Option<Sqlite>,
}

/// SQLite configuration object.
#[derive(Default, Deserialize)]
pub struct Sqlite {
    /// Use absolute/relative path.
    pub path: Option<String>,
}

pub const DEF_ENGINE: &'static str = DbEngine::SQLITE;
pub const DEF_SQLITE_PATH: &'static str = "devreg.db";

/// To register Clap arguments.
pub fn reg_args(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("devreg.db.engine")
            .long("devreg.db.engine")
            .help("database engine")
            .num_args(1)
            .value_parser([DbEngine::SQLITE]),
    )
    .arg(
        Arg::new("devreg.db.sqlite.path")
            .long("devreg.db.sqlite.path")
            .help("SQLite path")
            .num_args(1),
    )
}

/// To read input arguments from command-line arguments and environment variables.
///
/// This function will call [`apply_default()`] to fill missing values so you do not need call it
/// again.
pub fn read_args(args: &ArgMatches) -> Config {
    apply_default(&Config {
        db: Some(Db {
            engine: match args.get_one::<String>("devreg.db.engine") {
                None => match env::var("DEVREG_DB_ENGINE") {
                    Err(_) => None,
                    Ok(v) => Some(v),
                },
                Some(v) => Some(v.clone()),
            },
            sqlite: Some(Sqlite {
                path: match args.get_one::<String>("devreg.db.sqlite.path") {
                    None => match env::var("DEVREG_DB_SQLITE_PATH") {
                        Err(_) => None,
                        Ok(v) => Some(v),
                    },
                    Some(v) => Some(v.clone()),
                },
            }),
        }),
    })
}

/// Fill missing configuration with default values.
pub fn apply_default(config: &Config) -> Config {
    Config {
        db: match config.db.as_ref() {
            None => Some(Db {
                engine: Some(DEF_ENGINE.to_string()),
                sqlite: Some(Sqlite {
                    path: Some(DEF_SQLITE_PATH.to_string()),
                }),
            }),
            Some(db) => Some(Db {
                engine: match db.engine.as_ref() {
                    None => Some(DEF_ENGINE.to_string()),
                    Some(engine) => match engine.as_str() {
                        DbEngine::SQLITE => Some(DbEngine::SQLITE.to_string()),
                        _ => Some(DEF_ENGINE.to_string()),
                    },
                },
                sqlite: match db.sqlite.as_ref() {
                    None => Some(Sqlite {
                        path: Some(DEF_SQLITE_PATH.to_string()),
                    }),
                    Some(sqlite) => Some(Sqlite {
                        path: match sqlite.path.as_ref() {
                            None => Some(DEF_SQLITE_PATH.to_string()),
                            Some(path) => Some(path.clone()),
                        },
                    }),
                },
            }),
        },
    }
}
