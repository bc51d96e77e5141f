use hwatro_core::{
    Card, CardKind, Event, EventBus, GameConfig, Phase, RibbonColor, RunError, RunState, Snapshot,
};
use serde::Serialize;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

#[derive(Debug, Clone, Default)]
struct CliOptions {
    seed: Option<u64>,
    config: Option<PathBuf>,
}

#[derive(Serialize)]
struct StateDump<'a> {
    seed: u64,
    snapshot: &'a Snapshot,
}

fn main() {
    let options = match parse_args() {
        Ok(options) => options,
        Err(message) => {
            eprintln!("{message}");
            std::process::exit(2);
        }
    };

    let config = match load_config(&options) {
        Ok(config) => config,
        Err(message) => {
            eprintln!("{message}");
            std::process::exit(2);
        }
    };

    let seed = options.seed.unwrap_or_else(wall_clock_seed);
    let mut run = RunState::new(config, seed);
    let mut events = EventBus::default();
    if let Err(err) = run.start_stage(&mut events) {
        eprintln!("failed to start: {err}");
        std::process::exit(1);
    }
    println!("hwatro (seed {seed}) -- type 'help' for commands");
    flush_events(&mut events);
    print_table(&run);

    let stdin = io::stdin();
    loop {
        print!("> ");
        let _ = io::stdout().flush();
        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) => break,
            Ok(_) => {}
            Err(_) => break,
        }
        let parts: Vec<&str> = line.split_whitespace().collect();
        let Some(&command) = parts.first() else {
            continue;
        };
        match command {
            "help" | "?" => print_help(),
            "quit" | "exit" | "q" => break,
            "hand" | "h" => print_table(&run),
            "state" => print_state(&run, seed),
            "peek" => match run.deck_preview() {
                Some(card) => println!("next draw: {}", describe_card(card)),
                None => println!("no preview available"),
            },
            "play" | "p" => {
                if let Some(index) = parse_index(&parts) {
                    report(run.play(index, &mut events).map(|_| ()));
                    flush_events(&mut events);
                    print_table(&run);
                } else {
                    println!("usage: play <hand index>");
                }
            }
            "discard" | "d" => {
                if let Some(index) = parse_index(&parts) {
                    report(run.discard(index, &mut events));
                    flush_events(&mut events);
                    print_table(&run);
                } else {
                    println!("usage: discard <hand index>");
                }
            }
            "shop" => {
                report(run.enter_shop(&mut events));
                flush_events(&mut events);
                print_shop(&run);
            }
            "buy" | "b" => {
                if let Some(index) = parse_index(&parts) {
                    let target = parts.get(2).and_then(|value| value.parse::<u32>().ok());
                    report(run.purchase_upgrade(index, target, &mut events));
                    flush_events(&mut events);
                    print_shop(&run);
                } else {
                    println!("usage: buy <offer index> [card id]");
                }
            }
            "reroll" | "r" => {
                report(run.reroll_shop(&mut events));
                flush_events(&mut events);
                print_shop(&run);
            }
            "next" | "n" => {
                report(run.advance_stage(&mut events));
                flush_events(&mut events);
                print_table(&run);
            }
            other => println!("unknown command: {other} (try 'help')"),
        }
    }
}

fn parse_args() -> Result<CliOptions, String> {
    let mut options = CliOptions::default();
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--seed" => {
                let value = args.next().ok_or("--seed expects a number")?;
                options.seed = Some(value.parse().map_err(|_| "--seed expects a number")?);
            }
            "--config" => {
                let value = args.next().ok_or("--config expects a path")?;
                options.config = Some(PathBuf::from(value));
            }
            other => return Err(format!("unknown argument: {other}")),
        }
    }
    Ok(options)
}

fn load_config(options: &CliOptions) -> Result<GameConfig, String> {
    let Some(path) = options.config.as_ref() else {
        return Ok(GameConfig::standard());
    };
    let text = std::fs::read_to_string(path)
        .map_err(|err| format!("cannot read {}: {err}", path.display()))?;
    serde_json::from_str(&text).map_err(|err| format!("bad config {}: {err}", path.display()))
}

fn wall_clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|duration| duration.as_nanos() as u64)
        .unwrap_or(0)
}

fn parse_index(parts: &[&str]) -> Option<usize> {
    parts.get(1).and_then(|value| value.parse().ok())
}

fn report(result: Result<(), RunError>) {
    if let Err(err) = result {
        println!("rejected: {err}");
    }
}

fn flush_events(events: &mut EventBus) {
    for event in events.drain() {
        println!("  * {}", describe_event(&event));
    }
}

fn print_help() {
    println!("commands:");
    println!("  play <i>        play hand card i onto the floor");
    println!("  discard <i>     discard hand card i (uses one discard)");
    println!("  shop            enter the shop after clearing a round");
    println!("  buy <i> [card]  buy shop offer i (card id for targeted items)");
    println!("  reroll          reroll the shop offers");
    println!("  next            advance to the next stage (or retry/reset)");
    println!("  hand            show the table");
    println!("  peek            show the next draw (needs foresight)");
    println!("  state           dump the snapshot as JSON");
    println!("  quit            leave");
}

fn print_table(run: &RunState) {
    let snapshot = run.snapshot();
    println!(
        "stage {} | target {} | score {} x {:.2} = {} | gold {} | discards {} | deck {}",
        snapshot.stage,
        snapshot.target,
        snapshot.base,
        snapshot.mult,
        snapshot.total,
        snapshot.gold,
        snapshot.discards_left,
        snapshot.deck_len,
    );
    print!("hand :");
    for (index, card) in snapshot.hand.iter().enumerate() {
        print!(" [{index}] {}", describe_card(card));
    }
    println!();
    print!("floor:");
    for card in &snapshot.floor {
        print!(" {}", describe_card(card));
    }
    println!();
    match snapshot.phase {
        Phase::RoundOver => println!("round over: {:?}", snapshot.outcome),
        Phase::Shop => println!("(in shop; 'buy', 'reroll' or 'next')"),
        _ => {}
    }
}

fn print_shop(run: &RunState) {
    let Some(shop) = run.shop.as_ref() else {
        return;
    };
    println!("shop (reroll costs {}):", shop.reroll_cost);
    for (index, offer) in shop.offers.iter().enumerate() {
        println!(
            "  [{index}] {} ({:?}) - {} gold",
            offer.name, offer.rarity, offer.price
        );
    }
}

fn print_state(run: &RunState, seed: u64) {
    let snapshot = run.snapshot();
    let dump = StateDump {
        seed,
        snapshot: &snapshot,
    };
    match serde_json::to_string_pretty(&dump) {
        Ok(json) => println!("{json}"),
        Err(err) => println!("cannot serialize state: {err}"),
    }
}

fn describe_card(card: &Card) -> String {
    let kind = match card.kind {
        CardKind::Light => "light",
        CardKind::Ten => "ten",
        CardKind::Ribbon(RibbonColor::Red) => "red-ribbon",
        CardKind::Ribbon(RibbonColor::Blue) => "blue-ribbon",
        CardKind::Ribbon(RibbonColor::Green) => "green-ribbon",
        CardKind::Junk => "junk",
        CardKind::DualJunk => "dual-junk",
        CardKind::SakeCup => "sake-cup",
    };
    format!("m{}:{kind}#{}", card.month, card.id)
}

fn describe_event(event: &Event) -> String {
    match event {
        Event::StageStarted {
            stage,
            target,
            discards,
            hand,
        } => format!("stage {stage} started: target {target}, {discards} discards, {hand} cards"),
        Event::CardPlayed { card, matched } => {
            if *matched {
                format!("played {} onto a matching month", describe_card(card))
            } else {
                format!("played {}", describe_card(card))
            }
        }
        Event::DeckRevealed { card } => format!("deck revealed {}", describe_card(card)),
        Event::CardsDiscarded { count, recycled } => {
            if *recycled {
                format!("discarded {count} card(s) back into the deck")
            } else {
                format!("discarded {count} card(s)")
            }
        }
        Event::CombinationAchieved { combo } => format!("combination: {}", combo.name()),
        Event::Scored { base, mult, total } => {
            format!("score {base} x {mult:.2} = {total}")
        }
        Event::RoundEnded {
            success,
            total,
            target,
        } => {
            if *success {
                format!("round cleared: {total} / {target}")
            } else {
                format!("round failed: {total} / {target}")
            }
        }
        Event::GoldEarned {
            interest,
            enhanced,
            stage_bonus,
            total,
        } => format!(
            "earned {total} gold ({interest} interest, {enhanced} gilded, {stage_bonus} stage)"
        ),
        Event::ShopEntered {
            offers,
            reroll_cost,
        } => format!("shop open: {offers} offers, reroll {reroll_cost}"),
        Event::ShopRerolled {
            cost,
            reroll_cost,
            gold,
        } => format!("rerolled for {cost}; next reroll {reroll_cost}, gold {gold}"),
        Event::UpgradePurchased { id, cost, gold } => {
            format!("bought {id} for {cost} (gold {gold})")
        }
        Event::StageAdvanced { stage, target } => {
            format!("advancing to stage {stage} (target {target})")
        }
        Event::RevivalUsed { stage } => format!("revival consumed; retrying stage {stage}"),
        Event::RunReset { stage } => format!("run reset to stage {stage}"),
    }
}
