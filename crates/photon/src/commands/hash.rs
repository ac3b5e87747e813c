//! `photon hash`: print the login digest, for comparing against a browser
//! capture of `/api/user/login`.

use secrecy::ExposeSecret;

use crate::cli::{GlobalOpts, HashArgs};
use crate::config;
use crate::error::CliError;

pub fn handle(args: &HashArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let cfg = config::load(global)?;
    let password = photon_config::resolve_password(&cfg.router)?;
    let digest =
        photon_api::hash::password_hash(&cfg.router.username, password.expose_secret(), &args.token);
    println!("{digest}");
    Ok(())
}
