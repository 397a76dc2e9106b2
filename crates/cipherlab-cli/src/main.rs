//! Command-line interface for `cipherlab`.

#![forbid(unsafe_code)]

use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;

use aes_core::{expand_key, trace, trace_round, Aes128Key, RoundTrace};
use cipherlab_graph::{evaluate, GraphSnapshot, NodeValue};
use cipherlab_modes::{
    cbc_decrypt, cbc_encrypt, ctr_transform, ecb_decrypt, ecb_encrypt, Aes128, BlockCipher,
    CounterOrder, CtrLayout, Des, XorCipher,
};

/// Cipherlab CLI.
#[derive(Parser)]
#[command(
    name = "cipherlab",
    version,
    author,
    about = "Block-cipher workbench: ECB/CBC/CTR over AES-128, DES, and a demo XOR cipher"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Selectable block cipher.
#[derive(Clone, Copy, Debug, ValueEnum)]
enum CipherKind {
    /// Repeating-key XOR demonstration cipher.
    Xor,
    /// AES-128.
    Aes,
    /// Single DES.
    Des,
}

/// Selectable chaining mode.
#[derive(Clone, Copy, Debug, ValueEnum)]
enum ModeKind {
    /// Electronic codebook.
    Ecb,
    /// Cipher block chaining.
    Cbc,
    /// Counter mode.
    Ctr,
}

#[derive(Subcommand)]
enum Commands {
    /// Encrypt a file.
    Encrypt {
        /// Cipher to apply.
        #[arg(long, value_enum, default_value = "aes")]
        cipher: CipherKind,
        /// Chaining mode.
        #[arg(long, value_enum, default_value = "cbc")]
        mode: ModeKind,
        /// Key as hex characters.
        #[arg(long, value_name = "HEX")]
        key_hex: String,
        /// CBC initialization vector as hex.
        #[arg(long, value_name = "HEX")]
        iv_hex: Option<String>,
        /// CTR nonce as hex.
        #[arg(long, value_name = "HEX")]
        nonce_hex: Option<String>,
        /// CTR counter start value.
        #[arg(long, default_value_t = 0)]
        counter: u64,
        /// Serialize the CTR counter little-endian instead of big-endian.
        #[arg(long, default_value_t = false)]
        little_endian_counter: bool,
        /// Input file.
        #[arg(long, value_name = "FILE")]
        input: PathBuf,
        /// Output file.
        #[arg(long, value_name = "FILE")]
        output: PathBuf,
    },
    /// Decrypt a file (CTR decryption re-applies the keystream).
    Decrypt {
        /// Cipher to apply.
        #[arg(long, value_enum, default_value = "aes")]
        cipher: CipherKind,
        /// Chaining mode.
        #[arg(long, value_enum, default_value = "cbc")]
        mode: ModeKind,
        /// Key as hex characters.
        #[arg(long, value_name = "HEX")]
        key_hex: String,
        /// CBC initialization vector as hex.
        #[arg(long, value_name = "HEX")]
        iv_hex: Option<String>,
        /// CTR nonce as hex.
        #[arg(long, value_name = "HEX")]
        nonce_hex: Option<String>,
        /// CTR counter start value.
        #[arg(long, default_value_t = 0)]
        counter: u64,
        /// Serialize the CTR counter little-endian instead of big-endian.
        #[arg(long, default_value_t = false)]
        little_endian_counter: bool,
        /// Input file.
        #[arg(long, value_name = "FILE")]
        input: PathBuf,
        /// Output file.
        #[arg(long, value_name = "FILE")]
        output: PathBuf,
    },
    /// Print the AES-128 stage-by-stage round trace for one block.
    Trace {
        /// AES-128 key as 32 hex characters.
        #[arg(long, value_name = "HEX")]
        key_hex: String,
        /// Plaintext block as 32 hex characters.
        #[arg(long, value_name = "HEX")]
        plaintext_hex: String,
        /// Display round to print (1..=10); all rounds when omitted.
        #[arg(long)]
        round: Option<usize>,
    },
    /// Evaluate a graph snapshot JSON with the demonstration cipher.
    Eval {
        /// Graph snapshot file.
        #[arg(long, value_name = "FILE")]
        graph: PathBuf,
    },
    /// Run a local demo: random key/IV/plaintext, CBC round trip.
    Demo {
        /// Optional RNG seed for reproducibility.
        #[arg(long)]
        seed: Option<u64>,
    },
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    match cli.command {
        Commands::Encrypt {
            cipher,
            mode,
            key_hex,
            iv_hex,
            nonce_hex,
            counter,
            little_endian_counter,
            input,
            output,
        } => cmd_transform(
            true,
            cipher,
            mode,
            &key_hex,
            iv_hex.as_deref(),
            nonce_hex.as_deref(),
            counter,
            little_endian_counter,
            &input,
            &output,
        ),
        Commands::Decrypt {
            cipher,
            mode,
            key_hex,
            iv_hex,
            nonce_hex,
            counter,
            little_endian_counter,
            input,
            output,
        } => cmd_transform(
            false,
            cipher,
            mode,
            &key_hex,
            iv_hex.as_deref(),
            nonce_hex.as_deref(),
            counter,
            little_endian_counter,
            &input,
            &output,
        ),
        Commands::Trace {
            key_hex,
            plaintext_hex,
            round,
        } => cmd_trace(&key_hex, &plaintext_hex, round),
        Commands::Eval { graph } => cmd_eval(&graph),
        Commands::Demo { seed } => cmd_demo(seed),
    }
}

fn build_cipher(kind: CipherKind, key_hex: &str) -> Result<Box<dyn BlockCipher>> {
    let key = hex::decode(key_hex.trim()).context("decode key hex")?;
    let cipher: Box<dyn BlockCipher> = match kind {
        CipherKind::Aes => Box::new(Aes128::new(&key)?),
        CipherKind::Des => Box::new(Des::new(&key)?),
        CipherKind::Xor => Box::new(XorCipher::new(&key, 16)?),
    };
    Ok(cipher)
}

#[allow(clippy::too_many_arguments)]
fn cmd_transform(
    encrypt: bool,
    cipher_kind: CipherKind,
    mode: ModeKind,
    key_hex: &str,
    iv_hex: Option<&str>,
    nonce_hex: Option<&str>,
    counter: u64,
    little_endian_counter: bool,
    input: &PathBuf,
    output: &PathBuf,
) -> Result<()> {
    let cipher = build_cipher(cipher_kind, key_hex)?;
    let data = fs::read(input).with_context(|| format!("read {}", input.display()))?;
    log::info!(
        "{} {} bytes ({:?}/{:?})",
        if encrypt { "encrypting" } else { "decrypting" },
        data.len(),
        cipher_kind,
        mode
    );

    let result = match mode {
        ModeKind::Ecb => {
            if encrypt {
                ecb_encrypt(&*cipher, &data)?
            } else {
                ecb_decrypt(&*cipher, &data)?
            }
        }
        ModeKind::Cbc => {
            let iv_hex = iv_hex.context("CBC requires --iv-hex")?;
            let iv = hex::decode(iv_hex.trim()).context("decode IV hex")?;
            if encrypt {
                cbc_encrypt(&*cipher, &iv, &data)?
            } else {
                cbc_decrypt(&*cipher, &iv, &data)?
            }
        }
        ModeKind::Ctr => {
            let nonce = match nonce_hex {
                Some(nonce_hex) => hex::decode(nonce_hex.trim()).context("decode nonce hex")?,
                None => Vec::new(),
            };
            let layout = CtrLayout {
                counter_order: if little_endian_counter {
                    CounterOrder::LittleEndian
                } else {
                    CounterOrder::BigEndian
                },
            };
            ctr_transform(&*cipher, &nonce, counter, layout, &data)?
        }
    };

    fs::write(output, result).with_context(|| format!("write {}", output.display()))?;
    Ok(())
}

fn parse_block_hex(label: &str, hex_str: &str) -> Result<[u8; 16]> {
    let bytes = hex::decode(hex_str.trim()).with_context(|| format!("decode {label} hex"))?;
    if bytes.len() != 16 {
        bail!("{label} must be 16 bytes (32 hex characters)");
    }
    let mut block = [0u8; 16];
    block.copy_from_slice(&bytes);
    Ok(block)
}

fn print_round(step: &RoundTrace) {
    println!("round {:>2}", step.round);
    println!("  input            {}", hex::encode(step.input));
    println!("  add round key    {}", hex::encode(step.after_add_round_key));
    println!("  sub bytes        {}", hex::encode(step.after_sub_bytes));
    println!("  shift rows       {}", hex::encode(step.after_shift_rows));
    match step.after_mix_columns {
        Some(mixed) => println!("  mix columns      {}", hex::encode(mixed)),
        None => println!("  output           {}", hex::encode(step.output)),
    }
    let ks = &step.key_step;
    println!(
        "  next key: rot {} sub {} rcon {} t {}",
        hex::encode(ks.rotated),
        hex::encode(ks.substituted),
        hex::encode(ks.rcon),
        hex::encode(ks.t)
    );
    let words: Vec<String> = ks.next_words.iter().map(hex::encode).collect();
    println!("  k{:<2}: {}", ks.round, words.join(" "));
}

fn cmd_trace(key_hex: &str, plaintext_hex: &str, round: Option<usize>) -> Result<()> {
    let key = Aes128Key::from(parse_block_hex("key", key_hex)?);
    let plaintext = parse_block_hex("plaintext", plaintext_hex)?;
    let round_keys = expand_key(&key);

    match round {
        Some(display_round) => {
            if !(1..=10).contains(&display_round) {
                bail!("round must be 1..=10");
            }
            print_round(&trace_round(&plaintext, &round_keys, display_round - 1));
        }
        None => {
            for step in trace(&plaintext, &round_keys) {
                print_round(&step);
            }
        }
    }
    Ok(())
}

fn cmd_eval(graph_path: &PathBuf) -> Result<()> {
    let json = fs::read_to_string(graph_path)
        .with_context(|| format!("read {}", graph_path.display()))?;
    let graph = GraphSnapshot::from_json(&json).context("parse graph snapshot")?;

    for (node_id, value) in evaluate(&graph) {
        match value {
            NodeValue::Bits(bits) => println!("{node_id}: {bits}"),
            NodeValue::Placeholder => println!("{node_id}: -"),
            NodeValue::Failed(err) => println!("{node_id}: error: {err}"),
        }
    }
    Ok(())
}

fn cmd_demo(seed: Option<u64>) -> Result<()> {
    let mut rng = seeded_rng(seed);
    let mut key = [0u8; 16];
    let mut iv = [0u8; 16];
    let mut plaintext = [0u8; 48];
    rng.fill_bytes(&mut key);
    rng.fill_bytes(&mut iv);
    rng.fill_bytes(&mut plaintext);

    let cipher = Aes128::new(&key)?;
    let ciphertext = cbc_encrypt(&cipher, &iv, &plaintext)?;
    let decrypted = cbc_decrypt(&cipher, &iv, &ciphertext)?;

    println!("demo key:   {}", hex::encode(key));
    println!("demo iv:    {}", hex::encode(iv));
    println!("plaintext:  {}", hex::encode(plaintext));
    println!("ciphertext: {}", hex::encode(&ciphertext));
    println!("decrypted:  {}", hex::encode(&decrypted));
    if decrypted != plaintext.to_vec() {
        bail!("demo roundtrip failed");
    }
    Ok(())
}

fn seeded_rng(seed: Option<u64>) -> ChaCha20Rng {
    match seed {
        Some(value) => {
            let mut seed_bytes = [0u8; 32];
            seed_bytes[..8].copy_from_slice(&value.to_le_bytes());
            ChaCha20Rng::from_seed(seed_bytes)
        }
        None => {
            let mut seed_bytes = [0u8; 32];
            rand::rngs::OsRng.fill_bytes(&mut seed_bytes);
            ChaCha20Rng::from_seed(seed_bytes)
        }
    }
}
