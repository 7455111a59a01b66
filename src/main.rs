use soluf_ide::{IdeConfig, OfflineAi, Workbench};
use std::io::{self, BufRead, Write};
use std::rc::Rc;

fn main() -> io::Result<()> {
    let config = IdeConfig::default();
    let prompt = config.prompt.clone();
    let mut bench = Workbench::new(config, Rc::new(OfflineAi));

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut shown = 0;
    print_new(&bench, &mut shown, &mut stdout)?;

    loop {
        write!(stdout, "{} ", prompt)?;
        stdout.flush()?;
        let mut input = String::new();
        if stdin.lock().read_line(&mut input)? == 0 {
            break;
        }
        let input = input.trim();
        if input == "exit" {
            break;
        }
        bench.submit(input);
        // no one to wait for here: jump straight past every pending delay
        bench.run_until_idle();
        // the echo line duplicates what was just typed
        shown += usize::from(!input.is_empty() && input != "clear");
        print_new(&bench, &mut shown, &mut stdout)?;
    }
    Ok(())
}

/// Prints active-session lines past `shown`, resetting after a clear.
fn print_new(bench: &Workbench, shown: &mut usize, out: &mut impl Write) -> io::Result<()> {
    let Some(session) = bench.context().sessions.active() else {
        return Ok(());
    };
    if session.logs.len() < *shown {
        *shown = 0;
    }
    for line in &session.logs[*shown..] {
        writeln!(out, "{}", line)?;
    }
    *shown = session.logs.len();
    Ok(())
}
