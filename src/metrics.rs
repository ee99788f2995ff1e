//! Advance widths for the built-in Helvetica faces.
//!
//! The standard Type1 core fonts ship fixed metrics, so cursor layout can
//! measure text without touching the PDF engine. Widths are in 1/1000 em,
//! indexed by ASCII code point 32..=126.

use crate::canvas::FontStyle;

/// Millimetres per typographic point.
pub(crate) const MM_PER_PT: f32 = 25.4 / 72.0;

/// Advance applied to any character outside the table.
const DEFAULT_WIDTH: u16 = 556;

#[rustfmt::skip]
const HELVETICA: [u16; 95] = [
    //  !    "    #    $    %    &    '    (    )    *    +    ,    -    .    /
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    //0    1    2    3    4    5    6    7    8    9    :    ;    <    =    >    ?
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556,
    //@    A    B    C    D    E    F    G    H    I    J    K    L    M    N    O
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
    //P    Q    R    S    T    U    V    W    X    Y    Z    [    \    ]    ^    _
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556,
    //`    a    b    c    d    e    f    g    h    i    j    k    l    m    n    o
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
    //p    q    r    s    t    u    v    w    x    y    z    {    |    }    ~
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
];

#[rustfmt::skip]
const HELVETICA_BOLD: [u16; 95] = [
    //  !    "    #    $    %    &    '    (    )    *    +    ,    -    .    /
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    //0    1    2    3    4    5    6    7    8    9    :    ;    <    =    >    ?
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611,
    //@    A    B    C    D    E    F    G    H    I    J    K    L    M    N    O
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778,
    //P    Q    R    S    T    U    V    W    X    Y    Z    [    \    ]    ^    _
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556,
    //`    a    b    c    d    e    f    g    h    i    j    k    l    m    n    o
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611,
    //p    q    r    s    t    u    v    w    x    y    z    {    |    }    ~
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,
];

fn char_width(style: FontStyle, c: char) -> u16 {
    let table = match style {
        FontStyle::Regular => &HELVETICA,
        FontStyle::Bold => &HELVETICA_BOLD,
    };
    let code = c as usize;
    if (32..=126).contains(&code) {
        table[code - 32]
    } else {
        DEFAULT_WIDTH
    }
}

/// Width of `text` in millimetres when set at `size_pt` points.
pub(crate) fn text_width_mm(style: FontStyle, size_pt: f32, text: &str) -> f32 {
    let units: u32 = text.chars().map(|c| u32::from(char_width(style, c))).sum();
    units as f32 / 1000.0 * size_pt * MM_PER_PT
}
