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

// Unsigned 32-bit primes from xxhash32.
const P1: u32 = 0x9E3779B1;
const P2: u32 = 0x85EBCA77;
const P3: u32 = 0xC2B2AE3D;
const P4: u32 = 0x27D4EB2F;
const P5: u32 = 0x165667B1;

/// One-shot XxHash32: a fast, non-cryptographic, 32-bit hash function with
/// good avalanche properties and ≈uniform output on non-adversarial keys.
pub(crate) fn xxhash32(data: &[u8], seed: u32) -> u32 {
    let len = data.len();
    let mut input = data;

    let mut hash = if len >= 16 {
        let mut v1 = seed.wrapping_add(P1).wrapping_add(P2);
        let mut v2 = seed.wrapping_add(P2);
        let mut v3 = seed;
        let mut v4 = seed.wrapping_sub(P1);

        while input.len() >= 16 {
            v1 = round(v1, read_u32_le(&input[0..4]));
            v2 = round(v2, read_u32_le(&input[4..8]));
            v3 = round(v3, read_u32_le(&input[8..12]));
            v4 = round(v4, read_u32_le(&input[12..16]));
            input = &input[16..];
        }

        v1.rotate_left(1)
            .wrapping_add(v2.rotate_left(7))
            .wrapping_add(v3.rotate_left(12))
            .wrapping_add(v4.rotate_left(18))
    } else {
        seed.wrapping_add(P5)
    };

    hash = hash.wrapping_add(len as u32);

    while input.len() >= 4 {
        let k1 = read_u32_le(&input[0..4]);
        hash = hash.wrapping_add(k1.wrapping_mul(P3));
        hash = hash.rotate_left(17).wrapping_mul(P4);
        input = &input[4..];
    }

    for &byte in input {
        hash = hash.wrapping_add((byte as u32).wrapping_mul(P5));
        hash = hash.rotate_left(11).wrapping_mul(P1);
    }

    finalize(hash)
}

#[inline]
fn round(mut acc: u32, input: u32) -> u32 {
    acc = acc.wrapping_add(input.wrapping_mul(P2));
    acc = acc.rotate_left(13);
    acc.wrapping_mul(P1)
}

#[inline]
fn finalize(mut hash: u32) -> u32 {
    hash ^= hash >> 15;
    hash = hash.wrapping_mul(P2);
    hash ^= hash >> 13;
    hash = hash.wrapping_mul(P3);
    hash ^ (hash >> 16)
}

#[inline]
fn read_u32_le(bytes: &[u8]) -> u32 {
    u32::from_le_bytes(bytes[..4].try_into().unwrap())
}
