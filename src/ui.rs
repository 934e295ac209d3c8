use std::{
    fmt::Write,
    io::stdout,
    time::Instant,
};

use crossterm::{
    cursor::MoveTo,
    execute,
    terminal::{self, ClearType},
};

use crate::scheduler::SwarmRuntime;
use crate::synth::Band;

/// Redraw the whole dashboard. Called at most every two seconds; the grid is
/// rebuilt as one string and blitted with a single cursor move.
pub fn print_dashboard(runtime: &SwarmRuntime, start_time: Instant, free_heap: u32) {
    let mut output = String::new();

    /////////// Status Bar ///////////

    let total_seconds = start_time.elapsed().as_secs();
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;
    let time_str = format!("{:02}:{:02}:{:02}", hours, minutes, seconds);

    let band = match runtime.band() {
        Band::Band2Ghz => "2.4GHz",
        Band::Band5Ghz => "5GHz",
    };
    let status = format!(
        "{:^18} | {:^16} | {:^20} | {:^12}",
        format!("Channel: {} ({})", runtime.current_channel(), band),
        format!("Frames: {}", runtime.metrics.total_packets),
        format!("Station: {}", runtime.local_mac),
        if runtime.paused { "PAUSED" } else { "RUNNING" },
    );
    writeln!(output, "{:<12} {:>8} | {:>76}", "phantomswarm", time_str, status).ok();
    writeln!(output, "{}", "-".repeat(101)).ok();

    /////////// Traffic Metrics ///////////

    let (split_2g, split_5g) = runtime.metrics.band_split();
    let memory_note = if runtime.governor.low_memory {
        " [LOW]"
    } else {
        ""
    };

    writeln!(
        output,
        "Free heap: {} KB{}   Active: {}   Dormant: {}   Shed: {}",
        free_heap / 1024,
        memory_note,
        runtime.pools.active.len(),
        runtime.pools.dormant.len(),
        runtime.governor.total_shed,
    )
    .ok();
    writeln!(
        output,
        "Packets: {}   Noise: {}   Beacons: {}   Interactions: {}",
        runtime.metrics.total_packets,
        runtime.metrics.junk_packets,
        runtime.metrics.beacons,
        runtime.metrics.interactions,
    )
    .ok();
    writeln!(output, "Band: 2.4G[{}%] 5G[{}%]", split_2g, split_5g).ok();
    writeln!(
        output,
        "SSIDs: {} stored, {} learned   Last: {}",
        runtime.ssids.len(),
        runtime.ssids.learned_total(),
        truncate(runtime.ssids.last_learned().unwrap_or("None"), 28),
    )
    .ok();

    let mesh_line = if !runtime.config.features.mesh_relay {
        "Mesh: disabled".to_string()
    } else if runtime.listening() {
        "Mesh: listening".to_string()
    } else if runtime.mesh.detected {
        format!(
            "Mesh: detected, {} cached, {} senders, {} relayed",
            runtime.mesh.cache_len(),
            runtime.mesh.sender_count(),
            runtime.metrics.mesh_rebroadcasts,
        )
    } else {
        "Mesh: standby".to_string()
    };
    writeln!(output, "{}", mesh_line).ok();
    writeln!(output, "{}", "-".repeat(101)).ok();

    /////////// Recent Status Messages ///////////

    for message in runtime.status_log.latest(8) {
        writeln!(
            output,
            "{} | {:^8} | {}",
            message.timestamp.format("%H:%M:%S"),
            message.message_type.to_string(),
            truncate(&message.content, 78),
        )
        .ok();
    }

    execute!(
        stdout(),
        MoveTo(0, 0),
        terminal::Clear(ClearType::FromCursorDown),
    )
    .ok();
    // Raw mode needs explicit carriage returns.
    print!("{}", output.replace('\n', "\r\n"));
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() > max {
        let cut: String = text.chars().take(max).collect();
        format!("{cut}...")
    } else {
        text.to_string()
    }
}
