use crate::mpls::{Clip, MarkType, MplsPlaylist, PlayItem, PlayListMark};
use crate::types::{FrameRate, TimeStamp};
use nom::{
    bytes::complete::{tag, take},
    combinator::{cond, map, map_res},
    error::{Error, ErrorKind},
    multi::{count, length_data, length_value},
    number::complete::{be_u16, be_u32, be_u64, be_u8},
    sequence::tuple,
    Err, IResult,
};

fn str_len(len: usize, input: &[u8]) -> IResult<&[u8], &str> {
    map_res(take(len), std::str::from_utf8)(input)
}

// matches the ASCII/UTF-8 string "MPLS"
fn header_tag(input: &[u8]) -> IResult<&[u8], &str> {
    map_res(tag("MPLS"), std::str::from_utf8)(input)
}

fn version(input: &[u8]) -> IResult<&[u8], &str> {
    str_len(4, input)
}

fn addr(input: &[u8]) -> IResult<&[u8], u32> {
    be_u32(input)
}

// the block an absolute header address points to
fn at(input: &[u8], addr: u32) -> Result<&[u8], Err<Error<&[u8]>>> {
    input
        .get(addr as usize..)
        .filter(|rest| !rest.is_empty())
        .ok_or_else(|| Err::Error(Error::new(input, ErrorKind::Eof)))
}

fn clip_file_name(input: &[u8]) -> IResult<&[u8], &str> {
    str_len(5, input)
}

fn clip_codec_id(input: &[u8]) -> IResult<&[u8], &str> {
    str_len(4, input)
}

fn is_multi_angle(input: &[u8]) -> IResult<&[u8], bool> {
    // 0000 0000 000X .... <-- connection_condition
    // |-reserved -|^---- the bit we want
    map(be_u16, |b| ((b & 0x1F) >> 4) == 1)(input)
}

fn time_stamp(input: &[u8]) -> IResult<&[u8], TimeStamp> {
    map(be_u32, TimeStamp)(input)
}

fn clip(input: &[u8], with_ref_to_stc_id: bool) -> IResult<&[u8], Clip> {
    let (input, file_name) = clip_file_name(input)?;
    let (input, codec_id) = clip_codec_id(input)?;
    let (input, _) = cond(with_ref_to_stc_id, take(1usize))(input)?;
    Ok((
        input,
        Clip {
            file_name: file_name.into(),
            codec_id: codec_id.into(),
        },
    ))
}

fn clip_with_clock_ref(input: &[u8]) -> IResult<&[u8], Clip> {
    clip(input, true)
}

fn frame_rate(n: u8) -> FrameRate {
    match n & 0x0F {
        0x1 => FrameRate::Fps23_976,
        0x2 => FrameRate::Fps24,
        0x3 => FrameRate::Fps25,
        0x4 => FrameRate::Fps29_97,
        0x6 => FrameRate::Fps50,
        0x7 => FrameRate::Fps59_94,
        _ => FrameRate::Unknown,
    }
}

// one entry of the stream number table; only the video attributes matter here
fn video_stream(input: &[u8]) -> IResult<&[u8], FrameRate> {
    fn attrs(input: &[u8]) -> IResult<&[u8], FrameRate> {
        let (input, coding_type) = be_u8(input)?;
        match coding_type {
            0x01 | 0x02 | 0x1B | 0x20 | 0x24 | 0xEA => map(be_u8, frame_rate)(input),
            _ => Ok((input, FrameRate::Unknown)),
        }
    }

    let (input, _entry) = length_data(be_u8)(input)?;
    length_value(be_u8, attrs)(input)
}

fn stream_number_table(input: &[u8]) -> IResult<&[u8], Vec<FrameRate>> {
    fn parser(input: &[u8]) -> IResult<&[u8], Vec<FrameRate>> {
        // reserved, primary video count, the other seven counts, reserved
        let (input, (_, n_video, _, _)) =
            tuple((take(2usize), be_u8, take(7usize), take(4usize)))(input)?;
        count(video_stream, n_video as usize)(input)
    }

    length_value(be_u16, parser)(input)
}

fn play_item_angles(input: &[u8]) -> IResult<&[u8], Vec<Clip>> {
    // main clip counts as an angle, too, so we want to read (n - 1) angle clips
    let (input, additional_angles) = map(be_u8, |n| n.saturating_sub(1))(input)?;
    // is_different_audios / is_seamless_angle_change
    let (input, _) = be_u8(input)?;
    count(clip_with_clock_ref, additional_angles as usize)(input)
}

fn play_item(input: &[u8]) -> IResult<&[u8], PlayItem> {
    fn parser(input: &[u8]) -> IResult<&[u8], PlayItem> {
        let (input, clip) = clip(input, false)?;
        let (input, is_multi_angle) = is_multi_angle(input)?;
        // RefToSTCID
        let (input, _) = take(1usize)(input)?;
        let (input, in_time) = time_stamp(input)?;
        let (input, out_time) = time_stamp(input)?;
        // UO mask table
        let (input, _) = be_u64(input)?;
        // PlayItemRandomAccessFlag, StillMode/StillTime
        let (input, _) = take(4usize)(input)?;
        let (input, angles) = cond(is_multi_angle, play_item_angles)(input)?;
        let (input, primary_video) = stream_number_table(input)?;
        Ok((
            input,
            PlayItem {
                clip,
                in_time,
                out_time,
                angles: angles.unwrap_or_default(),
                primary_video,
            },
        ))
    }

    length_value(be_u16, parser)(input)
}

fn play_list(input: &[u8]) -> IResult<&[u8], Vec<PlayItem>> {
    fn parser(input: &[u8]) -> IResult<&[u8], Vec<PlayItem>> {
        let (input, (_, n_play_items, _n_sub_paths)) =
            tuple((take(2usize), be_u16, be_u16))(input)?;
        count(play_item, n_play_items as usize)(input)
    }

    length_value(be_u32, parser)(input)
}

fn play_list_mark(input: &[u8]) -> IResult<&[u8], Vec<PlayListMark>> {
    fn mark_type(input: &[u8]) -> IResult<&[u8], MarkType> {
        map(be_u8, |n| match n {
            0x1 => MarkType::EntryPoint,
            0x2 => MarkType::LinkPoint,
            _ => MarkType::Unknown,
        })(input)
    }
    fn mark(input: &[u8]) -> IResult<&[u8], PlayListMark> {
        let (input, _) = be_u8(input)?;
        let (input, mark_type) = mark_type(input)?;
        let (input, play_item) = be_u16(input)?;
        let (input, mark_time) = time_stamp(input)?;
        // EntryESPID, meaning unknown
        let (input, _) = take(2usize)(input)?;
        let (input, duration) = time_stamp(input)?;
        Ok((
            input,
            PlayListMark {
                mark_type,
                play_item,
                time_stamp: mark_time,
                duration: if duration.0 == 0 { None } else { Some(duration) },
            },
        ))
    }
    fn parser(input: &[u8]) -> IResult<&[u8], Vec<PlayListMark>> {
        let (input, n_marks) = be_u16(input)?;
        count(mark, n_marks as usize)(input)
    }

    length_value(be_u32, parser)(input)
}

pub fn parse_mpls(input: &[u8]) -> IResult<&[u8], MplsPlaylist> {
    let (_, (_, _, play_list_addr, mark_addr)) =
        tuple((header_tag, version, addr, addr))(input)?;
    let (_, play_items) = play_list(at(input, play_list_addr)?)?;
    let (rest, marks) = play_list_mark(at(input, mark_addr)?)?;
    Ok((rest, MplsPlaylist { play_items, marks }))
}
