// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

//! Line-oriented top-K word counter.
//!
//! Reads from a file (`-f <path>`) or standard input, splits each line on
//! spaces, feeds every non-empty token to a plain top-K sketch, and prints
//! `item : count` lines in descending count order on EOF.

use std::env;
use std::fs::File;
use std::io;
use std::io::BufRead;
use std::io::BufReader;
use std::process::ExitCode;

use heavykeeper::topk::TopKSketch;

struct Config {
    file: Option<String>,
    k: usize,
    width: usize,
    depth: usize,
    decay: f32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            file: None,
            k: 10,
            width: 2048,
            depth: 5,
            decay: 0.9,
        }
    }
}

const USAGE: &str = "usage: word_count [-f <file>] [-k <top-k>] [-w <width>] [-d <depth>] [-p <decay>]";

fn main() -> ExitCode {
    let args: Vec<String> = env::args().skip(1).collect();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("error: {message}");
            eprintln!("{USAGE}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &[String]) -> Result<(), String> {
    let config = parse_args(args)?;

    let mut sketch = TopKSketch::builder(config.k)
        .width(config.width)
        .depth(config.depth)
        .decay(config.decay)
        .build();

    let reader: Box<dyn BufRead> = match &config.file {
        Some(path) => {
            let file = File::open(path).map_err(|err| format!("{path}: {err}"))?;
            Box::new(BufReader::new(file))
        }
        None => Box::new(BufReader::new(io::stdin())),
    };

    for line in reader.lines() {
        let line = line.map_err(|err| format!("read: {err}"))?;
        for token in line.split(' ') {
            if !token.is_empty() {
                sketch.add(token, 1);
            }
        }
    }

    for entry in sketch.sorted_slice() {
        println!("{} : {}", entry.item(), entry.count());
    }

    Ok(())
}

fn parse_args(args: &[String]) -> Result<Config, String> {
    let mut config = Config::default();
    let mut iter = args.iter();

    while let Some(flag) = iter.next() {
        match flag.as_str() {
            "-f" => config.file = Some(value_of(&mut iter, "-f")?.clone()),
            "-k" => config.k = positive_int(value_of(&mut iter, "-k")?, "-k")?,
            "-w" => config.width = positive_int(value_of(&mut iter, "-w")?, "-w")?,
            "-d" => config.depth = positive_int(value_of(&mut iter, "-d")?, "-d")?,
            "-p" => {
                let raw = value_of(&mut iter, "-p")?;
                let decay: f32 = raw
                    .parse()
                    .map_err(|_| format!("invalid value for -p: {raw}"))?;
                if decay <= 0.0 || decay >= 1.0 {
                    return Err(format!(
                        "-p must be between 0.0 and 1.0 (exclusive), got {raw}"
                    ));
                }
                config.decay = decay;
            }
            _ => return Err(format!("unknown flag: {flag}")),
        }
    }

    Ok(config)
}

fn value_of<'a>(
    iter: &mut std::slice::Iter<'a, String>,
    flag: &str,
) -> Result<&'a String, String> {
    iter.next().ok_or_else(|| format!("missing value for {flag}"))
}

fn positive_int(raw: &str, flag: &str) -> Result<usize, String> {
    let value: usize = raw
        .parse()
        .map_err(|_| format!("invalid value for {flag}: {raw}"))?;
    if value == 0 {
        return Err(format!("{flag} must be at least 1"));
    }
    Ok(value)
}
