use crate::app::{ROUTE_HOTKEYS, hotkey_for_route};
use crate::domain::{
    FilterState, INSIGHT_ROUTE_KEYS, MenuDescriptor, MenuEntry, Route, RouteKey,
    parse_browsers_type, parse_devices_type, parse_interval, parse_range, parse_referrers_type,
    parse_sizes_type, parse_sorting, parse_systems_type, parse_views_type, resolve,
};
use serde::Serialize;
use std::io::{self, Write};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum CliInvocation {
    PrintHelp,
    PrintVersion,
    Tui {
        config: Option<PathBuf>,
        route: Option<Route>,
    },
    Command(CliCommand),
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum CliCommand {
    Routes,
    Filters {
        route: Route,
        filters: FilterState,
        json: bool,
    },
}

#[derive(Debug, Error)]
pub enum CliParseError {
    #[error("unknown subcommand: {0}")]
    UnknownSubcommand(String),

    #[error("unknown flag: {0}")]
    UnknownFlag(String),

    #[error("missing value for flag: {0}")]
    MissingFlagValue(String),

    #[error("invalid value for {flag}: {value}")]
    InvalidFlagValue { flag: String, value: String },

    #[error("missing argument: {0}")]
    MissingArgument(&'static str),

    #[error("unexpected argument: {0}")]
    UnexpectedArgument(String),
}

pub fn parse_invocation(args: &[String]) -> Result<CliInvocation, CliParseError> {
    if args.iter().any(|arg| arg == "--help" || arg == "-h") {
        return Ok(CliInvocation::PrintHelp);
    }
    if args.iter().any(|arg| arg == "--version" || arg == "-V") {
        return Ok(CliInvocation::PrintVersion);
    }

    let mut iter = args.iter().skip(1).peekable();
    let mut config: Option<PathBuf> = None;
    let mut route: Option<Route> = None;
    while let Some(arg) = iter.peek() {
        match arg.as_str() {
            "--config" | "-c" => {
                let _ = iter.next();
                let value = iter
                    .next()
                    .ok_or_else(|| CliParseError::MissingFlagValue("--config".to_string()))?;
                config = Some(PathBuf::from(value));
            }
            "--route" | "-r" => {
                let _ = iter.next();
                let value = iter
                    .next()
                    .ok_or_else(|| CliParseError::MissingFlagValue("--route".to_string()))?;
                route = Some(parse_route_arg("--route", value)?);
            }
            "--" => {
                let _ = iter.next();
                break;
            }
            _ if arg.starts_with('-') => {
                return Err(CliParseError::UnknownFlag(arg.to_string()));
            }
            _ => break,
        }
    }

    let Some(subcommand) = iter.next() else {
        return Ok(CliInvocation::Tui { config, route });
    };

    match subcommand.as_str() {
        "routes" => {
            if let Some(arg) = iter.next() {
                return Err(CliParseError::UnexpectedArgument(arg.to_string()));
            }
            Ok(CliInvocation::Command(CliCommand::Routes))
        }
        "filters" => {
            let mut route: Option<Route> = None;
            let mut filters = FilterState::default();
            let mut json = false;

            let mut args = iter.peekable();
            while let Some(arg) = args.next() {
                match arg.as_str() {
                    "--sorting" => {
                        filters.sorting = parse_flag(&mut args, "--sorting", parse_sorting)?;
                    }
                    "--range" => {
                        filters.range = parse_flag(&mut args, "--range", parse_range)?;
                    }
                    "--interval" => {
                        filters.interval = parse_flag(&mut args, "--interval", parse_interval)?;
                    }
                    "--views-type" => {
                        filters.views_type =
                            parse_flag(&mut args, "--views-type", parse_views_type)?;
                    }
                    "--referrers-type" => {
                        filters.referrers_type =
                            parse_flag(&mut args, "--referrers-type", parse_referrers_type)?;
                    }
                    "--systems-type" => {
                        filters.systems_type =
                            parse_flag(&mut args, "--systems-type", parse_systems_type)?;
                    }
                    "--devices-type" => {
                        filters.devices_type =
                            parse_flag(&mut args, "--devices-type", parse_devices_type)?;
                    }
                    "--browsers-type" => {
                        filters.browsers_type =
                            parse_flag(&mut args, "--browsers-type", parse_browsers_type)?;
                    }
                    "--sizes-type" => {
                        filters.sizes_type =
                            parse_flag(&mut args, "--sizes-type", parse_sizes_type)?;
                    }
                    "--json" => json = true,
                    _ if arg.starts_with('-') => {
                        return Err(CliParseError::UnknownFlag(arg.to_string()));
                    }
                    _ if route.is_none() => {
                        route = Some(parse_route_arg("ROUTE", arg)?);
                    }
                    _ => {
                        return Err(CliParseError::UnexpectedArgument(arg.to_string()));
                    }
                }
            }

            let route = route.ok_or(CliParseError::MissingArgument("ROUTE"))?;
            Ok(CliInvocation::Command(CliCommand::Filters {
                route,
                filters,
                json,
            }))
        }
        other => Err(CliParseError::UnknownSubcommand(other.to_string())),
    }
}

fn flag_value<'a, I>(args: &mut I, flag: &str) -> Result<&'a str, CliParseError>
where
    I: Iterator<Item = &'a String>,
{
    args.next()
        .map(String::as_str)
        .ok_or_else(|| CliParseError::MissingFlagValue(flag.to_string()))
}

fn parse_flag<'a, I, T>(
    args: &mut I,
    flag: &str,
    parse: fn(&str) -> Option<T>,
) -> Result<T, CliParseError>
where
    I: Iterator<Item = &'a String>,
{
    let value = flag_value(args, flag)?;
    parse(value).ok_or_else(|| invalid(flag, value))
}

fn invalid(flag: &str, value: &str) -> CliParseError {
    CliParseError::InvalidFlagValue {
        flag: flag.to_string(),
        value: value.to_string(),
    }
}

/// Accepts a full path (`/insights/pages`) or a bare insight name (`pages`).
fn parse_route_arg(flag: &str, value: &str) -> Result<Route, CliParseError> {
    Route::parse(value)
        .or_else(|| Route::parse(&format!("/insights/{}", value.trim())))
        .ok_or_else(|| invalid(flag, value))
}

#[derive(Debug, Error)]
pub enum CliRunError {
    #[error("failed to write output: {0}")]
    Io(#[from] io::Error),

    #[error("failed to encode output: {0}")]
    Encode(#[from] serde_json::Error),
}

pub fn run(command: CliCommand) -> Result<(), CliRunError> {
    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());
    run_to(command, &mut out)?;
    match out.flush() {
        Err(error) if error.kind() == io::ErrorKind::BrokenPipe => Ok(()),
        other => Ok(other?),
    }
}

pub fn run_to(command: CliCommand, out: &mut impl Write) -> Result<(), CliRunError> {
    match command {
        CliCommand::Routes => {
            for (path, label, hotkey) in route_rows() {
                let hotkey = hotkey.unwrap_or_else(|| "-".to_string());
                if !write_line(out, &format!("{path}\t{label}\t{hotkey}"))? {
                    return Ok(());
                }
            }
        }
        CliCommand::Filters {
            route,
            filters,
            json,
        } => {
            let menus = resolve(route.key(), &filters);
            tracing::debug!(
                route = %route.path(),
                menus = menus.len(),
                "resolved filter bar"
            );
            if json {
                let report = FiltersReport {
                    route: route.path(),
                    section: route.key(),
                    filters,
                    menus,
                };
                let text = serde_json::to_string_pretty(&report)?;
                write_line(out, &text)?;
            } else {
                print_filters_human(out, &route, &menus)?;
            }
        }
    }
    Ok(())
}

#[derive(Serialize)]
struct FiltersReport {
    route: String,
    section: RouteKey,
    filters: FilterState,
    menus: Vec<MenuDescriptor>,
}

fn route_rows() -> Vec<(String, &'static str, Option<String>)> {
    let mut rows = vec![row_for(Route::Overview)];
    rows.push((
        "/domains/<id>".to_string(),
        RouteKey::Domain.label(),
        Some("0-9".to_string()),
    ));
    rows.extend(INSIGHT_ROUTE_KEYS.iter().copied().map(|key| row_for(Route::Insight(key))));
    rows.push(row_for(Route::Settings));
    debug_assert!(
        ROUTE_HOTKEYS
            .iter()
            .all(|hotkey| rows.iter().any(|(path, _, _)| *path == hotkey.route.path()))
    );
    rows
}

fn row_for(route: Route) -> (String, &'static str, Option<String>) {
    (
        route.path(),
        route.key().label(),
        hotkey_for_route(&route).map(String::from),
    )
}

fn print_filters_human(
    out: &mut impl Write,
    route: &Route,
    menus: &[MenuDescriptor],
) -> io::Result<()> {
    writeln!(out, "{} ({})", route.key().label(), route.path())?;
    if menus.is_empty() {
        writeln!(out, "  no filters")?;
        return Ok(());
    }
    for menu in menus {
        let hidden = if menu.visible { "" } else { " (hidden)" };
        writeln!(out, "  [{}]{hidden}", menu.label)?;
        for entry in &menu.items {
            match entry {
                MenuEntry::Separator => writeln!(out, "      ----")?,
                MenuEntry::Button(button) => {
                    let marker = if button.active { '*' } else { ' ' };
                    match button.description {
                        Some(description) => {
                            writeln!(out, "    {marker} {}  {description}", button.label)?;
                        }
                        None => writeln!(out, "    {marker} {}", button.label)?,
                    }
                }
            }
        }
    }
    Ok(())
}

fn write_line(out: &mut impl Write, line: &str) -> io::Result<bool> {
    match writeln!(out, "{line}") {
        Ok(()) => Ok(true),
        Err(error) if error.kind() == io::ErrorKind::BrokenPipe => Ok(false),
        Err(error) => Err(error),
    }
}
