use std::cell::RefCell;
use std::io::Write;
use std::rc::Rc;
use std::time::Duration;

use clap::Subcommand;
use pomcraft_core::{RunState, SessionKind, SettingsStore, TimerEngine, TimerEvent};

#[derive(Subcommand)]
pub enum TimerAction {
    /// Run the countdown in the foreground
    Run {
        /// Stop after this many completed work sessions
        #[arg(long, default_value = "1")]
        sessions: u32,
    },
}

fn label(session: SessionKind) -> &'static str {
    match session {
        SessionKind::Work => "Work",
        SessionKind::ShortBreak => "Short break",
        SessionKind::LongBreak => "Long break",
    }
}

pub fn run(action: TimerAction) -> Result<(), Box<dyn std::error::Error>> {
    let TimerAction::Run { sessions } = action;

    // Startup sequence: load settings once and seed the engine.
    let settings = SettingsStore::open_default()?;
    let mut engine = TimerEngine::new();
    engine.set_work_duration(settings.work_duration());
    engine.set_short_break_duration(settings.short_break_duration());
    engine.set_long_break_duration(settings.long_break_duration());
    engine.set_sessions_until_long_break(settings.sessions_until_long_break());

    let current = Rc::new(RefCell::new(engine.session()));
    let renderer_session = Rc::clone(&current);
    let bell = settings.notification_sound();
    engine.subscribe(move |event| match event {
        TimerEvent::TimeChanged { display, .. } => {
            print!("\r{} {display}  ", label(*renderer_session.borrow()));
            let _ = std::io::stdout().flush();
        }
        TimerEvent::SessionCompleted { session, .. } => {
            if bell {
                print!("\x07");
            }
            println!("\r{} session complete        ", label(*session));
        }
        TimerEvent::SessionChanged { session, .. } => {
            *renderer_session.borrow_mut() = *session;
        }
        _ => {}
    });

    println!("{} {} - press Ctrl-C to quit", label(engine.session()), engine.time_text());
    engine.start();

    while engine.completed_sessions() < sessions {
        std::thread::sleep(Duration::from_secs(1));
        engine.tick();

        // A completed session leaves the engine stopped on the next one.
        if engine.run_state() == RunState::Stopped {
            if engine.completed_sessions() >= sessions {
                break;
            }
            let next = engine.session();
            let auto = match next {
                SessionKind::Work => settings.auto_start_pomodoros(),
                _ => settings.auto_start_breaks(),
            };
            if !auto {
                wait_for_enter(next)?;
            }
            engine.start();
        }
    }

    println!(
        "Done: {} work session(s) completed",
        engine.completed_sessions()
    );
    Ok(())
}

fn wait_for_enter(session: SessionKind) -> Result<(), Box<dyn std::error::Error>> {
    print!("Press Enter to start {}...", label(session));
    std::io::stdout().flush()?;
    let mut line = String::new();
    std::io::stdin().read_line(&mut line)?;
    Ok(())
}
