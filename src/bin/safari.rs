use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use drone_safari::*;

const HELP: &str = "Commands: forward | backward | move <left|right> | turn <left|right> | photo | status | scan | reset | quit";

fn load_config() -> Result<SessionConfig> {
	match std::env::args().nth(1).as_deref() {
		None | Some("classic") => Ok(SessionConfig::classic()),
		Some("random") => Ok(SessionConfig::default()),
		Some(path) => {
			let text = std::fs::read_to_string(path).with_context(|| format!("reading config {}", path))?;
			Ok(SessionConfig::from_json_str(&text)?)
		}
	}
}

fn render(session: &GameSession, out: &mut impl Write) -> io::Result<()> {
	let snapshot = session.get_status();
	writeln!(out, "{}", format_grid(session))?;
	writeln!(out, "{}", format_hud(&snapshot, session.config().pictures_total))?;
	for line in format_side_panel(&snapshot, &session.config().species_list, &session.statistics()) {
		writeln!(out, "{}", line)?;
	}
	if snapshot.status.is_terminal() {
		writeln!(out, "Game over: {}. Type `reset` to play again.", snapshot.status.label())?;
	}
	Ok(())
}

fn main() -> Result<()> {
	tracing_subscriber::fmt()
		.with_env_filter(
			tracing_subscriber::EnvFilter::from_default_env()
				.add_directive(tracing::Level::INFO.into()),
		)
		.with_writer(io::stderr)
		.init();

	let mut session = GameSession::new(load_config()?)?;
	let stdout = io::stdout();
	let mut out = stdout.lock();
	writeln!(out, "{}", HELP)?;
	render(&session, &mut out)?;

	for line in io::stdin().lock().lines() {
		let line = line?;
		match line.trim() {
			"" => continue,
			"quit" | "q" | "exit" => break,
			"help" | "?" => writeln!(out, "{}", HELP)?,
			"scan" => writeln!(out, "{}", session.sensor_summary())?,
			"reset" | "r" => {
				session.reset()?;
				render(&session, &mut out)?;
			}
			text => match Command::parse_line(text) {
				Ok(command) => match session.apply(command) {
					Ok(_) => render(&session, &mut out)?,
					Err(e) => writeln!(out, "error: {}", e)?,
				},
				Err(e) => writeln!(out, "error: {}. {}", e, HELP)?,
			},
		}
		out.flush()?;
	}
	Ok(())
}
