use std::fs;
use std::io::Write;
use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use log::LevelFilter;
use simple_logger::SimpleLogger;

use core8080::{
    dump_memory, interrupt, step_with_hooks, DiagnosticTrap, Hooks, Memory, State8080,
    TrapFormat,
};

/// CP/M console entry point used by diagnostic programs.
const BDOS: u16 = 0x0005;
const BDOS_PRINT_STRING: u8 = 9;
const BDOS_PRINT_CHAR: u8 = 2;

/// Run an 8080 program image.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Binary image to load.
    image: PathBuf,

    /// Address the image is loaded at.
    #[arg(long, default_value = "0x100", value_parser = parse_u16)]
    offset: u16,

    /// Initial program counter; defaults to the load address.
    #[arg(long, value_parser = parse_u16)]
    pc: Option<u16>,

    /// Initial stack pointer.
    #[arg(long, default_value = "0", value_parser = parse_u16)]
    sp: u16,

    /// Bytes written after loading, e.g. `0x0000=0xc3,0x00,0x01`. Repeatable.
    #[arg(long = "patch", value_name = "ADDR=BYTES", value_parser = parse_patch)]
    patches: Vec<Patch>,

    /// Trap CALL 0x0005 as CP/M console output and stop on a jump to 0x0000.
    #[arg(long, default_value_t = false)]
    bdos: bool,

    /// Stop after this many instructions.
    #[arg(long, value_name = "N")]
    max_steps: Option<u64>,

    /// Inject an interrupt every N instructions.
    #[arg(long, value_name = "N", value_parser = clap::value_parser!(u64).range(1..))]
    interrupt_every: Option<u64>,

    /// Vectors injected in turn by --interrupt-every.
    #[arg(long, value_delimiter = ',', default_value = "1,2")]
    vectors: Vec<u8>,

    /// off, error, warn, info, debug or trace.
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Patch {
    address: u16,
    bytes: Vec<u8>,
}

fn parse_u16(s: &str) -> Result<u16, String> {
    parse_number(s).and_then(|n| u16::try_from(n).map_err(|_| format!("{s} does not fit in 16 bits")))
}

fn parse_u8(s: &str) -> Result<u8, String> {
    parse_number(s).and_then(|n| u8::try_from(n).map_err(|_| format!("{s} does not fit in 8 bits")))
}

fn parse_number(s: &str) -> Result<u32, String> {
    let s = s.trim();
    let parsed = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u32::from_str_radix(hex, 16),
        None => s.parse::<u32>(),
    };
    parsed.map_err(|e| format!("invalid number {s:?}: {e}"))
}

fn parse_patch(s: &str) -> Result<Patch, String> {
    let (address, bytes) = s
        .split_once('=')
        .ok_or_else(|| format!("expected ADDR=BYTES, got {s:?}"))?;
    let address = parse_u16(address)?;
    let bytes = bytes
        .split(',')
        .map(parse_u8)
        .collect::<Result<Vec<u8>, String>>()?;
    Ok(Patch { address, bytes })
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level: LevelFilter = args
        .log_level
        .parse()
        .map_err(|_| anyhow!("unknown log level {:?}", args.log_level))?;
    SimpleLogger::new().with_level(level).init()?;

    let image = fs::read(&args.image)
        .with_context(|| format!("reading {}", args.image.display()))?;
    let mut memory = Memory::new();
    memory
        .load(args.offset, &image)
        .with_context(|| format!("loading {}", args.image.display()))?;
    for patch in &args.patches {
        memory.patch(patch.address, &patch.bytes)?;
    }
    log::info!(
        "loaded {} bytes at {:#06x}, {} patch(es)",
        image.len(),
        args.offset,
        args.patches.len()
    );

    let mut state = State8080::with_pc_sp(args.pc.unwrap_or(args.offset), args.sp);

    let mut hooks = Hooks::new();
    if args.bdos {
        hooks = hooks
            .with_trap(DiagnosticTrap::new(
                BDOS,
                BDOS_PRINT_STRING,
                TrapFormat::DollarString,
                |text: &str| println!("{text}"),
            ))
            .with_trap(DiagnosticTrap::new(
                BDOS,
                BDOS_PRINT_CHAR,
                TrapFormat::Character,
                |text: &str| {
                    print!("{text}");
                    let _ = std::io::stdout().flush();
                },
            ));
    }

    let steps = run(&args, &mut state, &mut memory, &mut hooks)?;
    log::info!("stopped after {} instructions: {}", steps, state);
    Ok(())
}

fn run(args: &Args, state: &mut State8080, memory: &mut Memory, hooks: &mut Hooks) -> Result<u64> {
    let mut steps: u64 = 0;
    let mut next_vector = 0;
    loop {
        if args.max_steps.is_some_and(|max| steps >= max) {
            log::warn!("step limit of {} reached", steps);
            return Ok(steps);
        }

        let result = step_with_hooks(state, memory, hooks);
        steps += 1;
        let running = match result.into_result() {
            Ok(running) => running,
            Err(err) => {
                log::error!("{}", state);
                let from = state.pc.saturating_sub(0x20);
                let to = state.pc.saturating_add(0x20);
                log::error!("memory around pc:\n{}", dump_memory(memory, from..=to));
                return Err(err.into());
            }
        };
        if !running {
            log::info!("halted at {:#06x}", state.pc.wrapping_sub(1));
            return Ok(steps);
        }
        if args.bdos && state.pc == 0x0000 {
            log::info!("warm boot");
            return Ok(steps);
        }

        if let Some(every) = args.interrupt_every {
            if steps % every == 0 && !args.vectors.is_empty() {
                let vector = args.vectors[next_vector % args.vectors.len()];
                next_vector += 1;
                interrupt(state, memory, vector)?;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_accept_hex_and_decimal() {
        assert_eq!(parse_u16("0x100"), Ok(0x100));
        assert_eq!(parse_u16("256"), Ok(256));
        assert!(parse_u16("0x10000").is_err());
        assert!(parse_u8("0x1ff").is_err());
    }

    #[test]
    fn patch_syntax() {
        assert_eq!(
            parse_patch("0x0000=0xc3,0x00,1"),
            Ok(Patch {
                address: 0,
                bytes: vec![0xc3, 0x00, 0x01]
            })
        );
        assert!(parse_patch("0x0000").is_err());
        assert!(parse_patch("0x0000=zz").is_err());
    }

    #[test]
    fn args_parse() {
        let args = Args::try_parse_from([
            "run8080",
            "cpudiag.bin",
            "--bdos",
            "--patch",
            "0x0170=0x07",
            "--patch",
            "0x059c=0xc3,0xc2,0x05",
            "--vectors",
            "1,2",
        ])
        .unwrap();
        assert_eq!(args.offset, 0x100);
        assert_eq!(args.pc, None);
        assert!(args.bdos);
        assert_eq!(args.patches.len(), 2);
        assert_eq!(args.patches[1].bytes, vec![0xc3, 0xc2, 0x05]);
        assert_eq!(args.vectors, vec![1, 2]);
    }

    #[test]
    fn run_stops_on_halt() {
        let args = Args::try_parse_from(["run8080", "x.bin", "--max-steps", "100"]).unwrap();
        let mut memory = Memory::with_program(&[0x3e, 0x01, 0x76]).unwrap();
        let mut state = State8080::new();
        let mut hooks = Hooks::new();
        let steps = run(&args, &mut state, &mut memory, &mut hooks).unwrap();
        assert_eq!(steps, 2);
        assert_eq!(state.a, 1);
    }

    #[test]
    fn run_reports_unimplemented() {
        let args = Args::try_parse_from(["run8080", "x.bin"]).unwrap();
        let mut memory = Memory::with_program(&[0x00, 0xdb, 0x01]).unwrap();
        let mut state = State8080::new();
        let mut hooks = Hooks::new();
        let err = run(&args, &mut state, &mut memory, &mut hooks).unwrap_err();
        assert_eq!(
            err.downcast_ref::<core8080::CpuError>(),
            Some(&core8080::CpuError::UnimplementedOpcode(0xdb))
        );
        assert_eq!(state.pc, 1);
    }

    #[test]
    fn run_honours_step_limit() {
        let args = Args::try_parse_from(["run8080", "x.bin", "--max-steps", "5"]).unwrap();
        // JMP 0x0000 forever
        let mut memory = Memory::with_program(&[0xc3, 0x00, 0x00]).unwrap();
        let mut state = State8080::new();
        let mut hooks = Hooks::new();
        assert_eq!(run(&args, &mut state, &mut memory, &mut hooks).unwrap(), 5);
    }
}
