//! Synthetic classifier: sends gesture datagrams to a running receiver.

use rand::{Rng, seq::SliceRandom};
use std::{
    env,
    net::UdpSocket,
    process,
    sync::Arc,
    thread,
    time::Duration,
};
use wandlink::{
    log::{LogSink, Logger},
    osc::{OscArg, OscMessage, WandGesture, wekinator::WEKINATOR_ADDRESS},
    sink_info,
};

const GESTURES: [WandGesture; 4] = [
    WandGesture::LeftRightWave,
    WandGesture::UpDownWave,
    WandGesture::CircularMotion,
    WandGesture::Unknown,
];

#[derive(Debug, Clone, Copy)]
enum Mode {
    /// `Label|87.3`
    Delimited,
    /// `Label|87,3`, as sent by recognizers running under a comma-decimal locale.
    Comma,
    /// Wekinator `/wek/outputs` OSC message.
    Osc,
}

impl Mode {
    fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "delimited" | "text" => Some(Mode::Delimited),
            "comma" => Some(Mode::Comma),
            "osc" | "wekinator" => Some(Mode::Osc),
            _ => None,
        }
    }
}

fn payload<R: Rng>(rng: &mut R, mode: Mode, held: WandGesture) -> Vec<u8> {
    let confidence: f32 = rng.gen_range(60.0..100.0);
    match mode {
        Mode::Delimited => format!("{held}|{confidence:.1}").into_bytes(),
        Mode::Comma => format!("{held}|{confidence:.1}").replace('.', ",").into_bytes(),
        Mode::Osc => {
            let class = held.class_id().unwrap_or(0);
            OscMessage::new(WEKINATOR_ADDRESS, vec![OscArg::Float(class as f32)]).encode()
        }
    }
}

fn usage(prog: &str) -> ! {
    eprintln!("Usage:");
    eprintln!("  {prog} [ADDR] [COUNT] [RATE_HZ] [MODE]");
    eprintln!("  ADDR     target, default 127.0.0.1:5052");
    eprintln!("  COUNT    datagrams to send, default 200");
    eprintln!("  RATE_HZ  datagrams per second, default 30");
    eprintln!("  MODE     delimited | comma | osc, default delimited");
    process::exit(1);
}

fn main() -> std::io::Result<()> {
    let args: Vec<String> = env::args().collect();
    if args.len() > 5 {
        usage(&args[0]);
    }

    let addr = args.get(1).map_or("127.0.0.1:5052", String::as_str).to_owned();
    let count: u32 = match args.get(2).map(|s| s.parse()) {
        None => 200,
        Some(Ok(n)) => n,
        Some(Err(_)) => usage(&args[0]),
    };
    let rate: f32 = match args.get(3).map(|s| s.parse::<f32>()) {
        None => 30.0,
        Some(Ok(r)) if r > 0.0 && r.is_finite() => r,
        Some(_) => usage(&args[0]),
    };
    let mode = match args.get(4).map(|s| Mode::parse(s)) {
        None => Mode::Delimited,
        Some(Some(m)) => m,
        Some(None) => usage(&args[0]),
    };

    let logger = Logger::start_default(Some("wand_sim"), 1024, 16, 10);
    let log_sink: Arc<dyn LogSink> = Arc::new(logger.handle());

    let socket = UdpSocket::bind("0.0.0.0:0")?;
    let period = Duration::from_secs_f32(1.0 / rate);
    let mut rng = rand::thread_rng();

    eprintln!("[wand_sim] sending {count} {mode:?} datagrams to {addr} at {rate} Hz");
    sink_info!(log_sink, "[Sim] target {addr}, mode {mode:?}, rate {rate} Hz");

    // A gesture is held for a random run of datagrams, like a real wand.
    let mut held = GESTURES[0];
    let mut run_left = 0u32;
    for i in 0..count {
        if run_left == 0 {
            held = GESTURES.choose(&mut rng).copied().unwrap_or(GESTURES[0]);
            run_left = rng.gen_range(10..60);
        }
        run_left -= 1;

        let bytes = payload(&mut rng, mode, held);
        if let Err(e) = socket.send_to(&bytes, &addr) {
            eprintln!("[wand_sim] send failed: {e}");
        }
        if i % 30 == 0 {
            sink_info!(log_sink, "[Sim] #{i} {held}");
        }
        thread::sleep(period);
    }

    eprintln!("[wand_sim] done, log at {}", logger.file_path().display());
    Ok(())
}
