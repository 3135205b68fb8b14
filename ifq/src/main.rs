mod cli;

use anyhow::{Context, Result, bail};
use clap::Parser;
use cli::Cli;
use crossbeam_channel::unbounded;
use indufind::{EntityIndex, build_guide};
use serde_json::Value;
use std::io::Write;

#[derive(Clone, Copy)]
enum Class {
    Targets,
    Connections,
}

impl Class {
    fn parse(name: &str) -> Result<Self> {
        match name {
            "targets" => Ok(Class::Targets),
            "conns" | "connections" => Ok(Class::Connections),
            other => bail!("unknown entity class {other:?} (expected targets|conns)"),
        }
    }
}

enum Request {
    Search { class: Class, query: String },
    Guide { class: Class },
}

enum Reply {
    Ids(Vec<String>),
    Json(String),
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let corpus = std::fs::read(&cli.corpus)
        .with_context(|| format!("failed to read corpus file {:?}", cli.corpus))?;
    let corpus: Value = serde_json::from_slice(&corpus).context("corpus file is not valid JSON")?;

    let targets = build_index(&corpus, "targets")?;
    let connections = build_index(&corpus, "connections")?;
    println!(
        "Indexed {} targets, {} connections",
        targets.len(),
        connections.len()
    );

    if cli.guide {
        for (name, index) in [("targets", &targets), ("connections", &connections)] {
            println!("# {name}");
            println!("{}", serde_json::to_string_pretty(&build_guide(index).to_json())?);
        }
        return Ok(());
    }

    // The scan runs on a worker thread that owns both indices; the REPL
    // thread only ships query text back and forth.
    let (request_tx, request_rx) = unbounded::<Request>();
    let (reply_tx, reply_rx) = unbounded::<Result<Reply>>();

    std::thread::spawn(move || {
        for request in request_rx {
            let reply = match request {
                Request::Search { class, query } => pick(&targets, &connections, class)
                    .search(&query)
                    .map(Reply::Ids),
                Request::Guide { class } => {
                    let guide = build_guide(pick(&targets, &connections, class));
                    serde_json::to_string_pretty(&guide.to_json())
                        .map(Reply::Json)
                        .map_err(Into::into)
                }
            };
            if reply_tx.send(reply).is_err() {
                break;
            }
        }
    });

    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();
    loop {
        print!("> ");
        stdout.flush().unwrap();
        let mut line = String::new();
        if stdin.read_line(&mut line).unwrap() == 0 {
            break;
        }
        let line = line.trim();
        if line.is_empty() {
            continue;
        } else if line == "/bye" {
            break;
        }

        let request = match parse_command(line) {
            Ok(request) => request,
            Err(e) => {
                eprintln!("{e:#}");
                continue;
            }
        };
        request_tx.send(request).context("worker thread is gone")?;
        match reply_rx.recv().context("worker thread is gone")? {
            Ok(Reply::Ids(ids)) if ids.is_empty() => println!("no matches"),
            Ok(Reply::Ids(ids)) => {
                for (i, id) in ids.into_iter().enumerate() {
                    println!("[{i}] {id}");
                }
            }
            Ok(Reply::Json(text)) => println!("{text}"),
            Err(e) => eprintln!("Failed to search: {e:#}"),
        }
    }

    Ok(())
}

fn pick<'a>(targets: &'a EntityIndex, connections: &'a EntityIndex, class: Class) -> &'a EntityIndex {
    match class {
        Class::Targets => targets,
        Class::Connections => connections,
    }
}

/// Commands: `targets <query>`, `conns <query>`, `guide <class>`.
fn parse_command(line: &str) -> Result<Request> {
    let (head, rest) = match line.split_once(char::is_whitespace) {
        Some((head, rest)) => (head, rest.trim()),
        None => (line, ""),
    };
    match head {
        "guide" => Ok(Request::Guide {
            class: Class::parse(rest)?,
        }),
        _ => Ok(Request::Search {
            class: Class::parse(head)?,
            query: rest.to_string(),
        }),
    }
}

fn build_index(corpus: &Value, class: &str) -> Result<EntityIndex> {
    let mut index = EntityIndex::new();
    let Some(section) = corpus.get(class) else {
        return Ok(index);
    };
    let Some(entries) = section.as_object() else {
        bail!("corpus section {class:?} must be an object of id -> record");
    };
    index.index_all(
        entries
            .iter()
            .map(|(id, record)| (id.clone(), record.clone())),
    );
    Ok(index)
}
