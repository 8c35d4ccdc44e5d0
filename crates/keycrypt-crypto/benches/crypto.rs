use keycrypt_crypto::{Crypto, HashAlgo};

fn make_data(size: usize) -> Vec<u8> {
    (0..size)
        .map(|i| (i.wrapping_mul(7) ^ (i >> 3)) as u8)
        .collect()
}

#[divan::bench(args = [HashAlgo::Md5, HashAlgo::Sha256, HashAlgo::Sha512, HashAlgo::Sha3_256, HashAlgo::Keccak256])]
fn bench_hash(bencher: divan::Bencher, algo: HashAlgo) {
    let crypto = Crypto::new("bench-secret");
    let data = make_data(4096);
    bencher
        .counter(divan::counter::BytesCount::new(data.len()))
        .bench(|| crypto.hash(divan::black_box(&data), algo).unwrap());
}

#[divan::bench(args = [1024, 65536, 1048576])]
fn bench_encrypt(bencher: divan::Bencher, size: usize) {
    let crypto = Crypto::new("bench-secret");
    let data = make_data(size);
    bencher
        .counter(divan::counter::BytesCount::new(size))
        .bench(|| crypto.encrypt(divan::black_box(&data)).unwrap());
}

#[divan::bench(args = [1024, 65536, 1048576])]
fn bench_decrypt(bencher: divan::Bencher, size: usize) {
    let crypto = Crypto::new("bench-secret");
    let data = make_data(size);
    let encrypted = crypto.encrypt(&data).unwrap();
    bencher
        .counter(divan::counter::BytesCount::new(size))
        .bench(|| crypto.decrypt(divan::black_box(&encrypted)).unwrap());
}

fn main() {
    divan::main();
}
