//! Terminal input demo (default binary).
//!
//! Polls the resolver once per tick and prints every command it produces.
//! Keys follow the in-game table (F1 lists them). `G` switches to text entry
//! until Enter or Escape, `D` toggles joystick-style repeat, Backspace waits
//! for any key, and `Shift-Q`, `Alt-F4` or `Ctrl-C` quit.

mod logging;

use std::io::{self, Write};
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::{execute, style::Print};
use tracing::info;

use tworld_input::core::{help_table, HelpContext, InputConfig, InputResolver};
use tworld_input::term::{TermConfig, TermEventSource};
use tworld_input::types::{Command, TICK_MS};

fn main() -> Result<()> {
    let _log_guard = logging::init();

    let mut source = TermEventSource::new(TermConfig::from_env());
    source.enter()?;

    let result = run(&mut source);

    // Always try to restore terminal state.
    let _ = source.exit();
    result
}

fn say(line: &str) -> Result<()> {
    let mut stdout = io::stdout();
    execute!(stdout, Print(line), Print("\r\n"))?;
    stdout.flush()?;
    Ok(())
}

fn show_help(context: HelpContext) -> Result<()> {
    for line in help_table(context).lines() {
        say(&format!("  {line}"))?;
    }
    Ok(())
}

fn run(source: &mut TermEventSource) -> Result<()> {
    let config = InputConfig::from_env();
    info!(?config, "starting");
    let mut input = InputResolver::with_config(source, config);

    say(&format!(
        "tworld-input: {} repeat, {} (F1 for help)",
        if input.is_joystick_style() { "joystick" } else { "keyboard" },
        if input.source().release_events() { "key releases" } else { "release timeout" },
    ))?;

    let tick = Duration::from_millis(u64::from(TICK_MS));
    let mut next_tick = Instant::now() + tick;
    let mut password = String::new();

    loop {
        if input.source().interrupted() {
            return Ok(());
        }

        if let Some(cmd) = input.poll_command(false)? {
            if input.is_text_entry() {
                match cmd {
                    Command::PROCEED | Command::QUIT_LEVEL => {
                        say(&format!("password: {password:?}"))?;
                        password.clear();
                        input.set_text_entry_mode(false);
                    }
                    Command::WEST => {
                        password.pop();
                    }
                    Command::QUIT => return Ok(()),
                    c => {
                        if let Some(letter) = c.as_letter() {
                            password.push(letter.to_ascii_uppercase());
                        }
                    }
                }
            } else {
                match cmd {
                    Command::QUIT => return Ok(()),
                    Command::HELP => show_help(HelpContext::InGame)?,
                    Command::GOTO_LEVEL => {
                        say("enter password, Enter to finish:")?;
                        input.set_text_entry_mode(true);
                    }
                    Command::DEBUG_CMD_1 => {
                        let joystick = !input.is_joystick_style();
                        input.set_repeat_style(joystick);
                        say(if joystick { "joystick style" } else { "keyboard style" })?;
                    }
                    Command::PAUSE_GAME => {
                        say("paused, press any key (Q to quit)")?;
                        if !input.wait_for_any_key()? {
                            return Ok(());
                        }
                    }
                    Command::PRESERVE => {}
                    c => say(&format!("{c}"))?,
                }
            }
        }

        let now = Instant::now();
        if next_tick > now {
            std::thread::sleep(next_tick - now);
        }
        next_tick += tick;
        if next_tick < Instant::now() {
            next_tick = Instant::now() + tick;
        }
    }
}
