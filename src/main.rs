// src/main.rs
// Command-line application for PDS Reader

use std::env;
use std::fs::File;
use std::io::BufReader;
use std::process;
use pds_reader::{read_transfer, Capture, Channel, Payload, Result};

fn print_usage() {
    eprintln!("Usage: pds_reader <command> <file> [options]");
    eprintln!();
    eprintln!("Commands:");
    eprintln!("  info <file>                          Display capture information");
    eprintln!("  csv <file> <output> [--verbose]      Convert waveform capture to CSV");
    eprintln!("  png <file> <output>                  Convert bitmap capture to PNG");
    eprintln!("  extract <file> <channel>             Extract a single channel to stdout");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --framed    Input is a recorded transfer (12 byte header + payload)");
    eprintln!("  --verbose   Include device name and channel count in CSV output");
    eprintln!();
    eprintln!("Examples:");
    eprintln!("  pds_reader info capture.bin");
    eprintln!("  pds_reader csv capture.bin output.csv --verbose");
    eprintln!("  pds_reader png --framed screen.dump screen.png");
    eprintln!("  pds_reader extract capture.bin 0 > ch1.txt");
}

fn load_capture(path: &str, framed: bool) -> Result<Capture> {
    if framed {
        let mut reader = BufReader::new(File::open(path)?);
        read_transfer(&mut reader)
    } else {
        let data = std::fs::read(path)?;
        Capture::decode(&data)
    }
}

fn main() {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let mut framed = false;
    let mut verbose = false;
    let mut args: Vec<String> = Vec::new();
    for arg in env::args() {
        match arg.as_str() {
            "--framed" => framed = true,
            "--verbose" => verbose = true,
            _ => args.push(arg),
        }
    }

    if args.len() < 3 {
        print_usage();
        process::exit(1);
    }

    let command = &args[1];
    let input_file = &args[2];

    let capture = match load_capture(input_file, framed) {
        Ok(capture) => capture,
        Err(e) => {
            eprintln!("Error loading capture '{}': {}", input_file, e);
            process::exit(1);
        }
    };

    match command.as_str() {
        "info" => {
            print_capture_info(&capture);
        }

        "csv" => {
            if args.len() < 4 {
                eprintln!("Error: Missing output file argument");
                print_usage();
                process::exit(1);
            }

            let output_file = &args[3];
            if let Err(e) = capture.write_csv(output_file, verbose) {
                eprintln!("Error writing CSV file '{}': {}", output_file, e);
                process::exit(1);
            }

            println!("Successfully converted {} to {}", input_file, output_file);
            println!("Channels written: {}", capture.channels().len());
        }

        "png" => {
            if args.len() < 4 {
                eprintln!("Error: Missing output file argument");
                print_usage();
                process::exit(1);
            }

            let output_file = &args[3];
            if let Err(e) = capture.write_png(output_file) {
                eprintln!("Error writing PNG file '{}': {}", output_file, e);
                process::exit(1);
            }

            println!("Successfully converted {} to {}", input_file, output_file);
        }

        "extract" => {
            if args.len() < 4 {
                eprintln!("Error: Missing channel number argument");
                print_usage();
                process::exit(1);
            }

            let channel_num: usize = match args[3].parse() {
                Ok(n) => n,
                Err(_) => {
                    eprintln!("Error: Invalid channel number '{}'", args[3]);
                    process::exit(1);
                }
            };

            match capture.channel(channel_num) {
                Some(channel) => {
                    println!("# Channel {} from {}", channel.name_str(), input_file);
                    println!("# Time (s), Voltage (V)");

                    for (time, voltage) in channel.time_values().iter().zip(&channel.voltages) {
                        println!("{:.12e}, {:.6e}", time, voltage);
                    }
                }
                None => {
                    eprintln!("Error: Channel {} not found (capture has {} channels)",
                             channel_num, capture.channels().len());
                    process::exit(1);
                }
            }
        }

        _ => {
            eprintln!("Error: Unknown command '{}'", command);
            print_usage();
            process::exit(1);
        }
    }
}

fn print_capture_info(capture: &Capture) {
    println!("PDS Capture Information");
    println!("=======================");
    println!();
    println!("Name: {}", capture.name_str());
    println!("Length: {} bytes", capture.length);
    println!();

    match &capture.payload {
        Payload::Waveform { variant, channels } => {
            println!("Channel Data (variant {:?})", variant);
            println!("  Active channels: {}", channels.len());
            for channel in channels {
                print_channel_info(channel);
            }
        }
        Payload::Bitmap(bitmap) => {
            println!("Bitmap Data");
            println!("  Size: {}x{}", bitmap.width(), bitmap.height());
        }
    }
}

fn print_channel_info(channel: &Channel) {
    println!();
    println!("  Channel     {}", channel.name_str());
    println!("    Samples     {}", channel.samples);
    println!("    Timebase    {:.9}s", channel.timebase);
    println!("    Sample rate {:.3} MHz", channel.sample_rate / 1e6);
    println!("    Position    {:.3}s", channel.slow);
    println!("    Offset      {:.3}v", channel.offset);
    println!("    Sensitivity {:.2}v", channel.sensitivity);
    println!("    Attenuation {}X", channel.attenuation);

    if !channel.voltages.is_empty() {
        let min = channel.voltages.iter().fold(f64::INFINITY, |a, &b| a.min(b));
        let max = channel.voltages.iter().fold(f64::NEG_INFINITY, |a, &b| a.max(b));
        let avg = channel.voltages.iter().sum::<f64>() / channel.voltages.len() as f64;
        let rms = (channel.voltages.iter().map(|&x| x * x).sum::<f64>()
            / channel.voltages.len() as f64).sqrt();

        println!("    Data range  {:.3}V to {:.3}V (avg={:.3}V, rms={:.3}V)", min, max, avg, rms);
    }
}
