#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that drives a Summit session over stdin.
//!
//! The adapter owns the turn order and the dialogue with the players;
//! every board mutation still goes through commands, and everything the
//! adapter prints comes from events and snapshot queries.

use std::collections::BTreeSet;
use std::io::{self, Write};

use anyhow::{bail, Context, Result};
use clap::Parser;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use summit_board::{apply, query, Board};
use summit_core::{
    ClimberColour, ClimberId, Command, DiceOutcome, Direction, Event, Position, EDGE_LENGTH,
};
use summit_system_builder::{BuildProposal, Builder};
use summit_system_movement::{MoveRequest, Movement};

type InputLines = io::Lines<io::StdinLock<'static>>;

/// Summit, the dice-driven cube-climbing board game.
#[derive(Parser, Debug)]
#[command(name = "summit")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Number of players seated at the board (2-4)
    #[arg(short, long, default_value = "2")]
    players: u32,

    /// Random seed (default: random)
    #[arg(short, long)]
    seed: Option<u64>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let mut session = Session::new(args.players, args.seed)?;
    session.run()
}

struct Session {
    board: Board,
    rng: ChaCha8Rng,
    builder: Builder,
    movement: Movement,
    roster: Vec<ClimberId>,
}

impl Session {
    fn new(players: u32, seed: Option<u64>) -> Result<Self> {
        let seed = seed.unwrap_or_else(rand::random);
        let mut rng = ChaCha8Rng::seed_from_u64(seed);

        let mut board = Board::new();
        let mut commands = Vec::new();
        summit_system_setup::spawn_commands(players, &mut rng, &mut commands)
            .context("seating players")?;
        let mut events = Vec::new();
        for command in commands {
            apply(&mut board, command, &mut events);
        }
        let roster: Vec<ClimberId> = events
            .iter()
            .filter_map(|event| match event {
                Event::ClimberAdded { climber, .. } => Some(*climber),
                _ => None,
            })
            .collect();
        if roster.len() != players as usize {
            bail!("expected {players} climbers on the board, found {}", roster.len());
        }

        println!("summit: {players} players, seed {seed}");
        let view = query::climber_view(&board);
        for snapshot in view.iter() {
            println!(
                "  {} starts at {} holding {:?} and {:?}",
                colour_name(snapshot.colour),
                cell(snapshot.position),
                snapshot.power_cards[0],
                snapshot.power_cards[1],
            );
        }

        Ok(Self {
            board,
            rng,
            builder: Builder::new(),
            movement: Movement::new(),
            roster,
        })
    }

    fn run(&mut self) -> Result<()> {
        let mut lines = io::stdin().lines();
        let mut turn = 0usize;
        loop {
            let climber = self.roster[turn % self.roster.len()];
            self.begin_turn(climber);
            if !self.take_turn(climber, &mut lines)? {
                break;
            }
            turn += 1;
        }
        println!("thanks for climbing");
        Ok(())
    }

    fn begin_turn(&mut self, climber: ClimberId) {
        let colour = query::climber_view(&self.board)
            .get(climber)
            .map(|snapshot| colour_name(snapshot.colour))
            .unwrap_or("unknown");
        println!();
        println!("== {colour}'s turn ==");
        self.submit(Command::BeginTurn { climber });
    }

    /// Runs one turn's menu loop; returns `false` when the session should
    /// end.
    fn take_turn(&mut self, climber: ClimberId, lines: &mut InputLines) -> Result<bool> {
        loop {
            let Some(choice) = prompt(
                lines,
                "[b]uild [m]ove [r]oll [l]ayout [s]tatus [e]nd turn [q]uit> ",
            )?
            else {
                return Ok(false);
            };
            match choice.as_str() {
                "b" | "build" => self.build_action(climber, lines)?,
                "m" | "move" => self.move_action(climber, lines)?,
                "r" | "roll" => self.roll_action(climber, lines)?,
                "l" | "layout" => self.layout_action(lines)?,
                "s" | "status" => self.status_action(),
                "e" | "end" | "" => return Ok(true),
                "q" | "quit" => return Ok(false),
                other => println!("unrecognized choice `{other}`"),
            }
            if self.turn_is_over(climber) {
                println!("all actions spent; the turn passes on");
                return Ok(true);
            }
        }
    }

    fn turn_is_over(&self, climber: ClimberId) -> bool {
        query::climber_view(&self.board)
            .get(climber)
            .map_or(true, |snapshot| {
                !snapshot.can_build && !snapshot.can_move && !snapshot.can_roll
            })
    }

    fn build_action(&mut self, climber: ClimberId, lines: &mut InputLines) -> Result<()> {
        if self.builder.remaining(climber) == 0 {
            println!("no placements left this turn");
            return Ok(());
        }
        let Some(position) = prompt_position(lines)? else {
            return Ok(());
        };
        let mut commands = Vec::new();
        self.builder
            .handle(&[], Some(BuildProposal::new(climber, position)), &mut commands);
        for command in commands {
            self.submit(command);
        }
        Ok(())
    }

    fn move_action(&mut self, climber: ClimberId, lines: &mut InputLines) -> Result<()> {
        if !self.movement.may_move(climber) {
            println!("the move action is already spent");
            return Ok(());
        }
        let destinations: Vec<Position> =
            query::valid_destinations(&self.board, climber).into_iter().collect();
        if destinations.is_empty() {
            println!("no destination is reachable");
            return Ok(());
        }
        list_cells(&destinations);
        let Some(index) = prompt_index(lines, destinations.len())? else {
            return Ok(());
        };
        let mut commands = Vec::new();
        self.movement.handle(
            &[],
            Some(MoveRequest::new(climber, destinations[index])),
            |id| query::valid_destinations(&self.board, id),
            &mut commands,
        );
        for command in commands {
            self.submit(command);
        }
        Ok(())
    }

    fn roll_action(&mut self, climber: ClimberId, lines: &mut InputLines) -> Result<()> {
        let can_roll = query::climber_view(&self.board)
            .get(climber)
            .map_or(false, |snapshot| snapshot.can_roll);
        if !can_roll {
            println!("the roll action is already spent");
            return Ok(());
        }
        let mut commands = Vec::new();
        let outcome = summit_system_dice::roll_and_resolve(
            climber,
            &mut self.rng,
            |id| query::grapple_candidates(&self.board, id),
            &mut commands,
        );
        for command in commands {
            self.submit(command);
        }
        match outcome {
            DiceOutcome::Blank => println!("the die shows a blank face"),
            DiceOutcome::Grapple { candidates } if candidates.is_empty() => {
                println!("the die shows grapple, but no column is in reach");
            }
            DiceOutcome::Grapple { candidates } => {
                println!("the die shows grapple");
                list_cells(&candidates);
                if let Some(index) = prompt_index(lines, candidates.len())? {
                    self.submit(Command::GrappleClimber {
                        climber,
                        destination: candidates[index],
                    });
                }
            }
            DiceOutcome::Wind => {
                println!("the die shows wind");
                match prompt_direction(lines)? {
                    Some(direction) => self.submit(Command::PushClimbers { climber, direction }),
                    None => println!("no direction chosen; the roll stays available"),
                }
            }
        }
        Ok(())
    }

    fn layout_action(&mut self, lines: &mut InputLines) -> Result<()> {
        let Some(answer) = prompt(lines, "level> ")? else {
            return Ok(());
        };
        let Ok(level) = answer.parse::<i32>() else {
            println!("levels are whole numbers counted from the ground");
            return Ok(());
        };
        let pieces = query::layout_at_level(&self.board, level * EDGE_LENGTH);
        if pieces.is_empty() {
            println!("nothing rests on level {level}");
            return Ok(());
        }
        for piece in pieces {
            match piece {
                query::PieceSnapshot::Cube(cube) => {
                    let marker = if cube.is_top { " (top)" } else { "" };
                    println!("  cube {} at {}{marker}", cube.cube.get(), cell(cube.position));
                }
                query::PieceSnapshot::Climber(snapshot) => {
                    println!(
                        "  {} at {}",
                        colour_name(snapshot.colour),
                        cell(snapshot.position)
                    );
                }
            }
        }
        Ok(())
    }

    fn status_action(&self) {
        for snapshot in query::climber_view(&self.board).iter() {
            println!(
                "  {} at {} | builds left {} | move {} | roll {} | cards {:?} {:?} | supply {}",
                colour_name(snapshot.colour),
                cell(snapshot.position),
                snapshot.builds_remaining,
                if snapshot.can_move { "ready" } else { "spent" },
                if snapshot.can_roll { "ready" } else { "spent" },
                snapshot.power_cards[0],
                snapshot.power_cards[1],
                snapshot.total_cubes,
            );
        }
    }

    /// Applies one command, keeps the pure systems fed, and narrates the
    /// resulting events.
    fn submit(&mut self, command: Command) {
        log::debug!("dispatching {command:?}");
        let mut events = Vec::new();
        apply(&mut self.board, command, &mut events);
        let mut sink = Vec::new();
        self.builder.handle(&events, None, &mut sink);
        self.movement
            .handle(&events, None, |_| BTreeSet::new(), &mut sink);
        for event in &events {
            println!("  {}", describe(event, &self.board));
        }
    }
}

fn prompt(lines: &mut InputLines, text: &str) -> Result<Option<String>> {
    print!("{text}");
    io::stdout().flush().context("flushing the prompt")?;
    match lines.next() {
        Some(line) => Ok(Some(line.context("reading stdin")?.trim().to_string())),
        None => Ok(None),
    }
}

fn prompt_position(lines: &mut InputLines) -> Result<Option<Position>> {
    let Some(answer) = prompt(lines, "cell as `x y z`> ")? else {
        return Ok(None);
    };
    let parts: Vec<i32> = answer
        .split_whitespace()
        .filter_map(|part| part.parse().ok())
        .collect();
    match parts.as_slice() {
        [x, y, z] => Ok(Some(Position::new(*x, *y, *z))),
        _ => {
            println!("cells are three whole numbers, for example `1 2 1`");
            Ok(None)
        }
    }
}

fn prompt_index(lines: &mut InputLines, len: usize) -> Result<Option<usize>> {
    let Some(answer) = prompt(lines, "pick> ")? else {
        return Ok(None);
    };
    match answer.parse::<usize>() {
        Ok(index) if index >= 1 && index <= len => Ok(Some(index - 1)),
        _ => {
            println!("pick a number between 1 and {len}");
            Ok(None)
        }
    }
}

fn prompt_direction(lines: &mut InputLines) -> Result<Option<Direction>> {
    let Some(answer) = prompt(lines, "direction [n/e/s/w]> ")? else {
        return Ok(None);
    };
    let direction = match answer.as_str() {
        "n" | "north" => Direction::North,
        "e" | "east" => Direction::East,
        "s" | "south" => Direction::South,
        "w" | "west" => Direction::West,
        _ => {
            println!("directions are n, e, s, or w");
            return Ok(None);
        }
    };
    Ok(Some(direction))
}

fn list_cells(cells: &[Position]) {
    for (index, candidate) in cells.iter().enumerate() {
        println!("  {}: {}", index + 1, cell(*candidate));
    }
}

fn cell(position: Position) -> String {
    format!("({}, {}, {})", position.x(), position.y(), position.z())
}

fn colour_of(board: &Board, climber: ClimberId) -> &'static str {
    query::climber_view(board)
        .get(climber)
        .map(|snapshot| colour_name(snapshot.colour))
        .unwrap_or("unknown")
}

const fn colour_name(colour: ClimberColour) -> &'static str {
    match colour {
        ClimberColour::Red => "red",
        ClimberColour::Yellow => "yellow",
        ClimberColour::Green => "green",
        ClimberColour::Blue => "blue",
    }
}

fn describe(event: &Event, board: &Board) -> String {
    match event {
        Event::ClimberAdded { position, colour, .. } => {
            format!("{} joined at {}", colour_name(*colour), cell(*position))
        }
        Event::TurnStarted { climber } => {
            format!("{} may build, move, and roll", colour_of(board, *climber))
        }
        Event::CubePlaced { cube, climber, position } => format!(
            "{} placed cube {} at {}",
            colour_of(board, *climber),
            cube.get(),
            cell(*position)
        ),
        Event::BuildRejected { climber, position, reason } => format!(
            "{} cannot build at {}: {reason}",
            colour_of(board, *climber),
            cell(*position)
        ),
        Event::BuildCompleted { climber } => {
            format!("{} finished building this turn", colour_of(board, *climber))
        }
        Event::ClimberMoved { climber, from, to } => format!(
            "{} moved {} -> {}",
            colour_of(board, *climber),
            cell(*from),
            cell(*to)
        ),
        Event::MoveRejected { climber, destination, reason } => format!(
            "{} cannot move to {}: {reason}",
            colour_of(board, *climber),
            cell(*destination)
        ),
        Event::ClimberGrappled { climber, from, to } => format!(
            "{} grappled {} -> {}",
            colour_of(board, *climber),
            cell(*from),
            cell(*to)
        ),
        Event::GrappleRejected { climber, destination, reason } => format!(
            "{} cannot grapple to {}: {reason}",
            colour_of(board, *climber),
            cell(*destination)
        ),
        Event::ClimberBlown { climber, from, to } => format!(
            "the wind blew {} {} -> {}",
            colour_of(board, *climber),
            cell(*from),
            cell(*to)
        ),
        Event::ClimberHeld { climber, position } => format!(
            "{} held on at {}",
            colour_of(board, *climber),
            cell(*position)
        ),
        Event::WindResolved { direction } => format!("the wind settled after blowing {direction:?}"),
        Event::RollSpent { climber } => format!("{} spent their roll", colour_of(board, *climber)),
        Event::RollRejected { climber, reason } => {
            format!("{} cannot roll: {reason}", colour_of(board, *climber))
        }
    }
}
