//! Instruction-driven exerciser for the rabu buffer.
//!
//! Accepts whitespace-delimited instruction tokens, each naming an
//! operation with positional operands, and executes them in order
//! against one mutable session. Exits non-zero on the first failing
//! instruction or on an unrecognized token.

use std::fmt;
use std::io::Write;
use std::path::PathBuf;

use anyhow::{anyhow, bail, Context, Result};
use clap::Parser;
use log::debug;

use rabu::{file, BufferPrinter, RandomAccessBuffer, Window};

#[derive(Parser, Debug)]
#[clap(name = "rabu-cli")]
#[clap(about = "Exercise a windowed random-access buffer with an instruction sequence", long_about = None)]
#[clap(after_help = Instruction::HELP)]
struct Cli {
    /// Instruction tokens, executed in order.
    #[clap(required = true)]
    instructions: Vec<String>,
}

/// One parsed instruction.
#[derive(Debug)]
enum Instruction {
    /// Print session state.
    Echo,
    /// Dump the buffer through the printer.
    Print,
    /// Ingest a file into a fresh buffer.
    Read(PathBuf),
    /// Write literal text at the cursor.
    Write(String),
    /// Position the cursor.
    Seek(usize),
    /// Cursor and printer back to zero.
    Reset,
    /// Re-view the buffer through a new window.
    Window(usize, usize),
    /// Emit the buffer to a file.
    Copy(PathBuf),
}

impl Instruction {
    const HELP: &'static str = "\
Instruction Set:
      echo                       -- Print session state.
      print                      -- Dump the buffer.
      read   <file>              -- Ingest file into a fresh buffer.
      write  <text>              -- Write literal text at the cursor.
      seek   <offset>            -- Position the cursor.
      reset                      -- Cursor back to zero.
      window <offset> <count>    -- Constrain the buffer to a window.
      copy   <file>              -- Emit the buffer to a file.";

    /// Consume one instruction (operator plus operands) off the token
    /// stream.
    fn parse(tokens: &mut impl Iterator<Item = String>) -> Option<Result<Self>> {
        let operator = tokens.next()?;
        Some(Self::parse_with(&operator, tokens))
    }

    fn parse_with(operator: &str, tokens: &mut impl Iterator<Item = String>) -> Result<Self> {
        let mut operand = |name: &str| {
            tokens
                .next()
                .ok_or_else(|| anyhow!("'{operator}' is missing its <{name}> operand"))
        };

        match operator {
            "echo" => Ok(Instruction::Echo),
            "print" => Ok(Instruction::Print),
            "reset" => Ok(Instruction::Reset),
            "read" => Ok(Instruction::Read(operand("file")?.into())),
            "copy" => Ok(Instruction::Copy(operand("file")?.into())),
            "write" => Ok(Instruction::Write(operand("text")?)),
            "seek" => {
                let ofs = operand("offset")?;
                Ok(Instruction::Seek(parse_int(operator, &ofs)?))
            }
            "window" => {
                let ofs = operand("offset")?;
                let count = operand("count")?;
                Ok(Instruction::Window(
                    parse_int(operator, &ofs)?,
                    parse_int(operator, &count)?,
                ))
            }
            unknown => bail!("unrecognized operator term '{unknown}'"),
        }
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Instruction::Echo => write!(f, "(echo)"),
            Instruction::Print => write!(f, "(print)"),
            Instruction::Read(p) => write!(f, "(read {})", p.display()),
            Instruction::Write(t) => write!(f, "(write {t})"),
            Instruction::Seek(x) => write!(f, "(seek {x})"),
            Instruction::Reset => write!(f, "(reset)"),
            Instruction::Window(x, c) => write!(f, "(window {x} {c})"),
            Instruction::Copy(p) => write!(f, "(copy {})", p.display()),
        }
    }
}

fn parse_int(operator: &str, token: &str) -> Result<usize> {
    token
        .parse()
        .with_context(|| format!("'{operator}' wants an integer operand, got '{token}'"))
}

/// Mutable session the instructions run against.
struct Session {
    rabu: Option<RandomAccessBuffer>,
    printer: BufferPrinter,
    file: Option<PathBuf>,
    read: usize,
    wrote: usize,
}

impl Session {
    fn new() -> Self {
        Session {
            rabu: None,
            printer: BufferPrinter::new(),
            file: None,
            read: 0,
            wrote: 0,
        }
    }

    fn buffer(&mut self) -> Result<&mut RandomAccessBuffer> {
        self.rabu
            .as_mut()
            .ok_or_else(|| anyhow!("no buffer in session; 'read' a file first"))
    }

    fn run(&mut self, instruction: &Instruction) -> Result<()> {
        debug!("executing {instruction}");
        match instruction {
            Instruction::Echo => self.echo(instruction),
            Instruction::Print => self.print(),
            Instruction::Read(path) => self.read(instruction, path),
            Instruction::Write(text) => self.write(text),
            Instruction::Seek(offset) => self.seek(*offset),
            Instruction::Reset => self.reset(),
            Instruction::Window(offset, count) => self.window(instruction, *offset, *count),
            Instruction::Copy(path) => self.copy(instruction, path),
        }
    }

    fn echo(&mut self, instruction: &Instruction) -> Result<()> {
        match &self.file {
            Some(file) => println!(
                "{instruction} test file: {}, read: {}, wrote: {}",
                file.display(),
                self.read,
                self.wrote
            ),
            None => println!("{instruction} test read: {}, wrote: {}", self.read, self.wrote),
        }

        if let Some(rabu) = &self.rabu {
            let window = rabu.window();
            println!(
                "{instruction} rabu window offset: {}, extent: {}",
                window.delta(),
                window.extent()
            );
            println!(
                "{instruction} rabu buffer length: {}, size: {}",
                rabu.storage_length(),
                rabu.storage_capacity()
            );
            println!(
                "{instruction} rabu i/o pointer internal: {}, external: {}",
                rabu.internal_offset(),
                rabu.offset()
            );
        }
        println!();
        Ok(())
    }

    fn print(&mut self) -> Result<()> {
        let printer = &mut self.printer;
        let rabu = self
            .rabu
            .as_mut()
            .ok_or_else(|| anyhow!("no buffer in session; 'read' a file first"))?;

        if !rabu.seek(0) {
            bail!("print: seek 0 failed (buffer empty?)");
        }

        let mut stdout = std::io::stdout().lock();
        let mut chunk = [0u8; 0x100];
        loop {
            let r = rabu.read_into(&mut chunk);
            if r == 0 {
                break;
            }
            printer.print(&chunk[..r], &mut stdout)?;
        }
        writeln!(stdout)?;
        Ok(())
    }

    fn read(&mut self, instruction: &Instruction, path: &PathBuf) -> Result<()> {
        let mut rabu = RandomAccessBuffer::new();
        self.read = file::read_path(path, &mut rabu)?;
        self.file = Some(path.clone());
        self.rabu = Some(rabu);
        self.printer.reset();

        self.echo(instruction)?;
        if self.read == 0 {
            bail!("read {}: file is empty", path.display());
        }
        Ok(())
    }

    fn write(&mut self, text: &str) -> Result<()> {
        let rabu = self.rabu.get_or_insert_with(RandomAccessBuffer::new);
        if !rabu.write_all(text.as_bytes()) {
            bail!("write: buffer refused {} bytes", text.len());
        }
        Ok(())
    }

    fn seek(&mut self, offset: usize) -> Result<()> {
        if !self.buffer()?.seek(offset) {
            bail!("seek {offset}: out of bounds");
        }
        Ok(())
    }

    fn reset(&mut self) -> Result<()> {
        self.printer.reset();
        if !self.buffer()?.reset() {
            bail!("reset: buffer is empty");
        }
        Ok(())
    }

    fn window(&mut self, instruction: &Instruction, offset: usize, count: usize) -> Result<()> {
        let window = Window::new(offset, count)?;
        let view = self.buffer()?.view(window);
        self.rabu = Some(view);
        self.printer.seek(offset);

        self.echo(instruction)
    }

    fn copy(&mut self, instruction: &Instruction, path: &PathBuf) -> Result<()> {
        self.file = Some(path.clone());
        self.wrote = {
            let rabu = self.buffer()?;
            file::write_path(path, rabu)?
        };

        self.echo(instruction)
    }
}


fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let mut session = Session::new();
    let mut tokens = cli.instructions.into_iter();
    while let Some(parsed) = Instruction::parse(&mut tokens) {
        let result = parsed.and_then(|instruction| session.run(&instruction));
        if let Err(e) = result {
            eprintln!("rabu-cli error: {e:#}");
            std::process::exit(1);
        }
    }
}
