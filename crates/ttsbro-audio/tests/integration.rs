use std::io::Cursor;

fn sine(len: usize) -> Vec<f32> {
    (0..len).map(|i| (i as f32 * 0.01).sin() * 0.8).collect()
}

#[test]
fn test_wav_readable_by_hound() {
    let samples = sine(1000);
    let wav = ttsbro_audio::encode_wav(&samples, 24000).unwrap();

    let reader = hound::WavReader::new(Cursor::new(wav)).unwrap();
    let spec = reader.spec();
    assert_eq!(spec.channels, 1);
    assert_eq!(spec.sample_rate, 24000);
    assert_eq!(spec.bits_per_sample, 16);
    assert_eq!(spec.sample_format, hound::SampleFormat::Int);
    assert_eq!(reader.len(), 1000);

    let decoded: Vec<i16> = reader.into_samples::<i16>().map(|s| s.unwrap()).collect();
    let expected: Vec<i16> = samples
        .iter()
        .map(|&s| ttsbro_audio::quantize_sample(s))
        .collect();
    assert_eq!(decoded, expected);
}

#[test]
fn test_empty_wav_readable_by_hound() {
    let wav = ttsbro_audio::encode_wav(&[], 24000).unwrap();
    let reader = hound::WavReader::new(Cursor::new(wav)).unwrap();
    assert_eq!(reader.len(), 0);
}

#[test]
fn test_lengths_for_various_sizes() {
    for len in [0usize, 1, 2, 3, 127, 4096] {
        let samples = sine(len);
        let wav = ttsbro_audio::encode_wav(&samples, 24000).unwrap();
        let raw = ttsbro_audio::encode_raw_pcm(&samples);
        assert_eq!(wav.len(), 44 + 2 * len);
        assert_eq!(raw.len(), 2 * len);
    }
}

#[test]
fn test_extremes_survive_hound_round_trip() {
    let samples = [1.0, -1.0, 1.5, -2.0, 0.0];
    let wav = ttsbro_audio::encode_wav(&samples, 8000).unwrap();
    let reader = hound::WavReader::new(Cursor::new(wav)).unwrap();
    let decoded: Vec<i16> = reader.into_samples::<i16>().map(|s| s.unwrap()).collect();
    assert_eq!(decoded, vec![32767, -32768, 32767, -32768, 0]);
}
