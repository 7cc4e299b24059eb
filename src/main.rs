// famicore - NES emulator entry point
//
// Usage: famicore [-r|-d|-i] <rom_path>
//   -r  run the emulator (default)
//   -d  disassemble PRG-ROM and exit
//   -i  print ROM metadata and exit
//
// Load failures exit with the error's negative code before emulation
// starts; runtime anomalies never terminate the process.

use famicore::debug::disassemble_prg;
use famicore::display::{run_emulator, WindowConfig};
use famicore::emulator::{Console, EmulatorConfig};
use famicore::input::{InputConfig, KeyboardHandler};
use famicore::Cartridge;
use std::env;
use std::path::PathBuf;
use std::process;

enum Mode {
    Run,
    Disassemble,
    Info,
}

fn usage(program: &str) -> ! {
    eprintln!("Usage: {} [-r|-d|-i] <rom_path>", program);
    process::exit(1);
}

fn main() {
    let args: Vec<String> = env::args().collect();
    let program = args.first().map(String::as_str).unwrap_or("famicore");

    let (mode, rom_path) = match args.len() {
        2 => (Mode::Run, args[1].clone()),
        3 => {
            let mode = match args[1].as_str() {
                "-r" => Mode::Run,
                "-d" => Mode::Disassemble,
                "-i" => Mode::Info,
                _ => usage(program),
            };
            (mode, args[2].clone())
        }
        _ => usage(program),
    };

    let cartridge = match Cartridge::from_ines_file(&rom_path) {
        Ok(cartridge) => cartridge,
        Err(e) => {
            eprintln!("NES rom load failed: {}", e);
            process::exit(e.exit_code());
        }
    };

    match mode {
        Mode::Info => {
            println!("{}", cartridge.metadata());
        }
        Mode::Disassemble => {
            for instruction in disassemble_prg(&cartridge.prg_rom) {
                println!("{}", instruction.format_line());
            }
        }
        Mode::Run => {
            let config = EmulatorConfig::load_or_default(famicore::emulator::CONFIG_FILE);
            let keyboard = KeyboardHandler::from_config(&InputConfig::load_or_default(
                "famicore_input.toml",
            ));
            let console = Console::new(cartridge);

            let window_config = WindowConfig::from_emulator_config(&config);
            if let Err(e) = run_emulator(
                console,
                window_config,
                keyboard,
                Some(PathBuf::from(&rom_path)),
            ) {
                eprintln!("Emulator error: {}", e);
                process::exit(1);
            }
        }
    }
}
