//! Built-in commands.

use std::time::Instant;

use cmdterm_types::error::Result;

use crate::arg::{CommandArg, join_arguments, join_raw_arguments};
use crate::interpreter::Environment;
use crate::registry::{CommandInfo, CommandRegistry};

/// Register all built-in commands into a registry.
///
/// `TRACE` is added only when `debug` is set.
pub fn register_builtins(reg: &mut CommandRegistry, debug: bool) -> Result<()> {
    reg.register(CommandInfo::new("noop", cmd_noop).help("Does nothing"))?;
    reg.register(
        CommandInfo::new("clear", cmd_clear)
            .help("Clears the Command Console")
            .max_args(0),
    )?;
    reg.register(
        CommandInfo::new("ls", cmd_ls)
            .help("Displays all Console Commands")
            .max_args(0),
    )?;
    reg.register(
        CommandInfo::new("help", cmd_help)
            .help("Displays help documentation of a Command")
            .hint("help [command]")
            .max_args(1),
    )?;
    reg.register(
        CommandInfo::new("time", cmd_time)
            .help("Times the execution of a Command")
            .hint("time <command> [args...]")
            .min_args(1),
    )?;
    reg.register(CommandInfo::new("print", cmd_print).help("Outputs message"))?;
    reg.register(
        CommandInfo::new("set", cmd_set)
            .help("Sets a variable, or lists variables when called without arguments")
            .hint("set [name] [value...]"),
    )?;
    if debug {
        reg.register(
            CommandInfo::new("trace", cmd_trace)
                .help("Outputs the StackTrace of the previous message")
                .max_args(0),
        )?;
    }
    reg.register(
        CommandInfo::new("quit", cmd_quit)
            .help("Quits running Application")
            .max_args(0),
    )?;
    Ok(())
}

// ---------------------------------------------------------------------------
// noop / clear
// ---------------------------------------------------------------------------

fn cmd_noop(_env: &mut Environment<'_>, _args: &[CommandArg]) -> Result<()> {
    Ok(())
}

fn cmd_clear(env: &mut Environment<'_>, _args: &[CommandArg]) -> Result<()> {
    env.logger.clear();
    Ok(())
}

// ---------------------------------------------------------------------------
// ls / help
// ---------------------------------------------------------------------------

fn cmd_ls(env: &mut Environment<'_>, _args: &[CommandArg]) -> Result<()> {
    let width = env.column_width;
    let lines: Vec<String> = env
        .commands()
        .map(|(name, info)| format!("{name:width$}: {}", info.help_text().unwrap_or("")))
        .collect();
    for line in lines {
        env.log(line);
    }
    Ok(())
}

fn cmd_help(env: &mut Environment<'_>, args: &[CommandArg]) -> Result<()> {
    let Some(arg) = args.first() else {
        return cmd_ls(env, args);
    };

    let name = arg.as_str().to_uppercase();
    let registry = env.registry;
    match registry.lookup(&name) {
        None => env.issue_error_message(format!("Command {name} could not be found.")),
        Some(info) => match info.help_text() {
            Some(help) if !help.is_empty() => env.log(help),
            _ => env.log(format!("{name} does not provide any help documentation.")),
        },
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// time / print
// ---------------------------------------------------------------------------

/// Runs the arguments as typed, so `$NAME` tokens are substituted by the
/// nested dispatch and never twice.
fn cmd_time(env: &mut Environment<'_>, args: &[CommandArg]) -> Result<()> {
    let start = Instant::now();
    env.run_command(&join_raw_arguments(args));
    let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;
    env.log(format!("Time: {elapsed_ms:.4}ms"));
    Ok(())
}

fn cmd_print(env: &mut Environment<'_>, args: &[CommandArg]) -> Result<()> {
    env.log(join_arguments(args));
    Ok(())
}

// ---------------------------------------------------------------------------
// set
// ---------------------------------------------------------------------------

fn cmd_set(env: &mut Environment<'_>, args: &[CommandArg]) -> Result<()> {
    let Some((name, value)) = args.split_first() else {
        let lines: Vec<String> = env
            .variables
            .iter()
            .map(|(name, value)| format!("{name}: {value}"))
            .collect();
        for line in lines {
            env.log(line);
        }
        return Ok(());
    };
    env.variables
        .insert(name.as_str().to_uppercase(), join_arguments(value));
    Ok(())
}

// ---------------------------------------------------------------------------
// trace
// ---------------------------------------------------------------------------

/// Reports the trace of the entry logged before this invocation. When the
/// host echoes input, the most recent entry is the `trace` line itself and is
/// skipped.
fn cmd_trace(env: &mut Environment<'_>, _args: &[CommandArg]) -> Result<()> {
    let skip = if env.input_echoed { 2 } else { 1 };
    let logs = env.logger.logs();
    let Some(entry) = logs.len().checked_sub(skip).map(|i| &logs[i]) else {
        env.log("Nothing to trace.");
        return Ok(());
    };

    let line = match entry.trace.as_deref() {
        Some(trace) if !trace.is_empty() => trace.to_string(),
        _ => format!("{} (no trace)", entry.message),
    };
    env.log(line);
    Ok(())
}

// ---------------------------------------------------------------------------
// quit
// ---------------------------------------------------------------------------

fn cmd_quit(env: &mut Environment<'_>, _args: &[CommandArg]) -> Result<()> {
    env.host.terminate();
    Ok(())
}
