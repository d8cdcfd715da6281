use crate::cmd::simulate::SimulationReport;
use comfy_table::presets::ASCII_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use swipe_core::{MachineSnapshot, ScoreRecord};
use swipe_protocol::leaderboard::Leaderboard;

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

fn right_align(table: &mut Table, from: usize, to: usize) {
    for i in from..=to {
        if let Some(col) = table.column_mut(i) {
            col.set_cell_alignment(CellAlignment::Right);
        }
    }
}

pub fn leaderboard(board: &Leaderboard, top: usize, me: &str) {
    if board.is_empty() {
        println!("No players on the leaderboard yet.");
        return;
    }

    let mut table = new_table();
    table.add_row(vec![
        Cell::new("#").add_attribute(Attribute::Bold),
        Cell::new("Player").add_attribute(Attribute::Bold),
        Cell::new("Best").fg(Color::Cyan),
    ]);

    for (i, user) in board.top(top).iter().enumerate() {
        let mut name = Cell::new(&user.username);
        if user.username == me {
            name = name.fg(Color::Green).add_attribute(Attribute::Bold);
        }
        table.add_row(vec![
            Cell::new(i + 1),
            name,
            Cell::new(user.score()).fg(Color::Cyan),
        ]);
    }
    right_align(&mut table, 2, 2);
    println!("\n{}", table);

    match board.rank_of(me) {
        Some(rank) if rank > top => println!("You ('{}') are ranked #{} of {}", me, rank, board.len()),
        Some(_) => {}
        None => println!("'{}' is not on the leaderboard.", me),
    }
}

pub fn score_record(record: &ScoreRecord, path: &str) {
    let mut table = new_table();
    table.add_row(vec![
        Cell::new("Current").add_attribute(Attribute::Bold),
        Cell::new("High").fg(Color::Cyan),
        Cell::new("Updated"),
    ]);
    table.add_row(vec![
        Cell::new(record.current_score),
        Cell::new(record.high_score).fg(Color::Cyan),
        Cell::new(record.last_updated.format("%Y-%m-%d %H:%M:%S UTC")),
    ]);
    println!("\n📁 {}\n{}", path, table);
}

pub fn snapshot(snap: &MachineSnapshot) {
    let mut table = new_table();
    table.add_row(vec![
        Cell::new("Round").add_attribute(Attribute::Bold),
        Cell::new("State"),
        Cell::new("Streak"),
        Cell::new("Level"),
        Cell::new("Score").fg(Color::Cyan),
        Cell::new("High").fg(Color::Cyan),
    ]);
    table.add_row(vec![
        Cell::new(snap.round_id),
        Cell::new(snap.state),
        Cell::new(snap.round.consecutive_correct),
        Cell::new(snap.difficulty),
        Cell::new(snap.current_score).fg(Color::Cyan),
        Cell::new(snap.high_score).fg(Color::Cyan),
    ]);
    println!("{}", table);
}

pub fn simulation(r: &SimulationReport) {
    let mut table = new_table();
    table.add_row(vec![
        Cell::new("Swipes").add_attribute(Attribute::Bold),
        Cell::new("Scored").fg(Color::Green),
        Cell::new("Missed").fg(Color::Red),
        Cell::new("Traps"),
        Cell::new("Guess ✔").fg(Color::Green),
        Cell::new("Guess ✖").fg(Color::Red),
        Cell::new("Fakes"),
        Cell::new("🎉"),
        Cell::new("Best").fg(Color::Cyan),
        Cell::new("Rounds"),
        Cell::new("Game Time"),
    ]);
    table.add_row(vec![
        Cell::new(r.swipes).add_attribute(Attribute::Bold),
        Cell::new(r.scored).fg(Color::Green),
        Cell::new(r.missed).fg(Color::Red),
        Cell::new(r.traps),
        Cell::new(r.guesses_right).fg(Color::Green),
        Cell::new(r.guesses_wrong).fg(Color::Red),
        Cell::new(r.fakes_shown),
        Cell::new(r.celebrations),
        Cell::new(r.high_score).fg(Color::Cyan),
        Cell::new(r.rounds),
        Cell::new(format!("{:.1}s", r.game_time.as_secs_f64())),
    ]);
    right_align(&mut table, 0, 10);

    println!("\n🤖 === SIMULATION === 🤖");
    println!("{}", table);
}
