//! Prints the effective configuration, with defaults filled in.

use crate::libs::config::Config;
use crate::libs::messages::Message;
use crate::{msg_bail_anyhow, msg_print};
use anyhow::Result;

pub fn cmd() -> Result<()> {
    let config = Config::read()?;
    let effective = match (config.engine_or_default(), config.display_or_default()) {
        (Ok(engine), Ok(display)) => Config {
            engine: Some(engine),
            display: Some(display),
        },
        (Err(e), _) | (_, Err(e)) => msg_bail_anyhow!(Message::ConfigInvalid(e.to_string())),
    };

    msg_print!(Message::ConfigHeader);
    println!("{}", serde_json::to_string_pretty(&effective)?);
    Ok(())
}
