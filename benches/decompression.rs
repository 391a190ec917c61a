use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use lcw::{decompress, OP_END, OP_FILL, OP_LONG_COPY};
use std::hint::black_box;
use std::time::Duration;

/// Build a synthetic LCW stream decoding to roughly `size` bytes
fn generate_stream(size: usize, pattern: &str) -> Vec<u8> {
    let mut stream = Vec::new();
    let mut produced = 0;

    match pattern {
        "literal" => {
            while produced < size {
                stream.push(0x80 | 0x3F);
                stream.extend((0..0x3F).map(|i| ((produced + i) * 17 % 256) as u8));
                produced += 0x3F;
            }
        }
        "fill" => {
            while produced < size {
                let run = (size - produced).min(4096);
                stream.push(OP_FILL);
                stream.extend_from_slice(&(run as u16).to_le_bytes());
                stream.push((produced / 4096) as u8);
                produced += run;
            }
        }
        "sprite" => {
            // 64-pixel rows: a literal row, then rows mixing short copies,
            // medium copies of the first row and runs
            stream.push(0x80 | 0x20);
            stream.extend((0..0x20u8).map(|i| i.wrapping_mul(7)));
            stream.push(0x80 | 0x20);
            stream.extend((0..0x20u8).map(|i| i.wrapping_mul(11)));
            produced = 64;
            while produced < size {
                // short copy of the previous row, 10 bytes at a time
                for _ in 0..4 {
                    stream.push(0x70);
                    stream.push(64);
                }
                // medium copy of 24 bytes from the first row
                stream.push(0xC0 | (24 - 3));
                stream.extend_from_slice(&0u16.to_le_bytes());
                produced += 64;
            }
        }
        "overlap" => {
            stream.extend_from_slice(&[0x81, 0x5A]);
            produced = 1;
            while produced < size {
                let count = (size - produced).min(u16::MAX as usize);
                stream.push(OP_LONG_COPY);
                stream.extend_from_slice(&(count as u16).to_le_bytes());
                stream.extend_from_slice(&0u16.to_le_bytes());
                produced += count;
            }
        }
        _ => panic!("Unknown pattern: {}", pattern),
    }

    stream.push(OP_END);
    stream
}

fn decompression_throughput(c: &mut Criterion) {
    let mut group = c.benchmark_group("decompression_throughput");
    group.measurement_time(Duration::from_secs(5));

    for size in [1024, 65536, 1048576].iter() {
        let size_label = match *size {
            1024 => "1KB",
            65536 => "64KB",
            1048576 => "1MB",
            _ => "unknown",
        };

        for pattern in ["literal", "fill", "sprite", "overlap"].iter() {
            let stream = generate_stream(*size, pattern);
            let output_size = decompress(&stream).len();

            group.throughput(Throughput::Bytes(output_size as u64));
            group.bench_with_input(
                BenchmarkId::from_parameter(format!("{}/{}", size_label, pattern)),
                &stream,
                |b, data| b.iter(|| decompress(black_box(data))),
            );
        }
    }

    group.finish();
}

fn decompression_malformed(c: &mut Criterion) {
    let mut group = c.benchmark_group("decompression_malformed");

    // pseudo-random bytes exercise every opcode and the dangling-copy paths
    let noise: Vec<u8> = (0..65536u32)
        .map(|x| (x.wrapping_mul(1664525).wrapping_add(1013904223) >> 24) as u8)
        .collect();

    group.throughput(Throughput::Bytes(noise.len() as u64));
    group.bench_function("random_64KB", |b| b.iter(|| decompress(black_box(&noise))));
    group.finish();
}

criterion_group!(benches, decompression_throughput, decompression_malformed);
criterion_main!(benches);
