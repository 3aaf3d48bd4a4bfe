use argh::FromArgs;
use ccf::ColorEntry;
use std::str::FromStr;

/// CCF color chart encoder and decoder.
#[derive(FromArgs)]
struct Cli {
    #[argh(subcommand)]
    command: Command,
}

#[derive(FromArgs)]
#[argh(subcommand)]
enum Command {
    Encode(Encode),
    Decode(Decode),
    Sample(Sample),
}

/// Encodes a text palette as CCF.
#[derive(FromArgs)]
#[argh(subcommand, name = "encode")]
struct Encode {
    /// the palette file: one `R G B label` entry per line, `#` starts a comment line
    #[argh(positional)]
    input: String,
    /// the output file
    #[argh(positional)]
    output: String,
}

/// Lists the named colors of a CCF file.
#[derive(FromArgs)]
#[argh(subcommand, name = "decode")]
struct Decode {
    /// also list the unnamed entries read from the fill region
    #[argh(switch)]
    all: bool,

    /// the input file
    #[argh(positional)]
    input: String,
}

/// Writes the built-in nine color demo palette as CCF.
#[derive(FromArgs)]
#[argh(subcommand, name = "sample")]
struct Sample {
    /// the output file
    #[argh(positional)]
    output: String,
}

/// One line of a text palette.
#[derive(Debug, PartialEq)]
struct PaletteLine(ColorEntry);

impl FromStr for PaletteLine {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.trim().splitn(4, char::is_whitespace);
        let mut channel = |name: &str| -> Result<u8, String> {
            let part = parts.next().ok_or_else(|| format!("missing {name} channel"))?;
            part.parse::<u8>()
                .map_err(|e| format!("invalid {name} channel `{part}`: {e}"))
        };
        let rgb = [channel("red")?, channel("green")?, channel("blue")?];
        let label = parts.next().unwrap_or_default().trim();

        Ok(PaletteLine(ColorEntry::new(rgb, label)))
    }
}

fn parse_palette(text: &str) -> Result<Vec<ColorEntry>, String> {
    text.lines()
        .enumerate()
        .filter(|(_, line)| {
            let line = line.trim();
            !line.is_empty() && !line.starts_with('#')
        })
        .map(|(i, line)| {
            line.parse::<PaletteLine>()
                .map(|PaletteLine(entry)| entry)
                .map_err(|e| format!("line {}: {e}", i + 1))
        })
        .collect()
}

fn sample_palette() -> Vec<ColorEntry> {
    vec![
        ColorEntry::new([255, 0, 0], "Red"),
        ColorEntry::new([0, 255, 0], "Green"),
        ColorEntry::new([0, 0, 255], "Blue"),
        ColorEntry::new([0, 0, 0], "黑色"),
        ColorEntry::new([255, 255, 255], "White白色"),
        ColorEntry::new([128, 128, 128], "Gray灰色"),
        ColorEntry::new([255, 255, 0], "Yellow"),
        ColorEntry::new([0, 255, 255], "Cyanシアン"),
        ColorEntry::new([255, 0, 255], "Magenta"),
    ]
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init();

    let Cli { command } = argh::from_env();

    match command {
        Command::Encode(options) => encode(options),
        Command::Decode(options) => decode(options),
        Command::Sample(options) => sample(options),
    }
}

fn encode(options: Encode) -> Result<(), Box<dyn std::error::Error>> {
    let Encode { input, output } = options;

    let palette = parse_palette(&std::fs::read_to_string(&input)?)?;
    println!("Encoding {} colors from `{input}`", palette.len());

    ccf::encode_to_path(&palette, &output)?;
    println!("Written {} bytes to `{output}`", ccf::consts::FILE_LEN);

    Ok(())
}

fn decode(options: Decode) -> Result<(), Box<dyn std::error::Error>> {
    let Decode { all, input } = options;

    let data = std::fs::read(&input)?;
    if !ccf::has_ccf_header(&data) {
        log::warn!("`{input}` doesn't start with the CCF header, decoding anyway");
    }

    let mut count = 0;
    for entry in ccf::decode(&data) {
        if !all && !entry.is_named() {
            continue;
        }

        let [r, g, b] = entry.rgb.to_rgb8();
        println!("{}\t8bit RGB: ({r}, {g}, {b})", entry.label);
        count += 1;
    }
    println!("Found {count} colors in `{input}`");

    Ok(())
}

fn sample(options: Sample) -> Result<(), Box<dyn std::error::Error>> {
    let Sample { output } = options;

    ccf::encode_to_path(&sample_palette(), &output)?;
    println!("Written sample palette to `{output}`");

    Ok(())
}
