//! Purpose: Resolve MIME charset names to raw byte encoders and decoders.
//! Exports: `Charset`, `CharsetEncoder`, `EncodeStatus`, `resolve`, `is_utf8_name`.
//! Role: Single seam between IANA charset names and the `encoding_rs` and code-page backends.
//! Invariants: Empty names and "utf-8" resolve to UTF-8 without touching the registry.
//! Invariants: Unknown names (UnknownCharset) and registered names without a backend
//! (UnsupportedCharset) fail with distinct error kinds.
//! Invariants: Decoding never substitutes U+FFFD; bad input is a Malformed error.

use std::borrow::Cow;

use encoding_rs::{DecoderResult, EncoderResult, Encoding};

use crate::core::code_page::{self, CodePage};
use crate::core::error::{Error, ErrorKind};

/// A resolved charset. Cheap to copy; encoders are created per use.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Charset {
    Utf8,
    Ascii,
    Latin1,
    Utf16Be,
    Utf16Le,
    Legacy(&'static Encoding),
    CodePage(&'static CodePage),
}

#[derive(Clone, Copy, Debug)]
enum Backend {
    Utf8,
    Ascii,
    Latin1,
    Utf16Be,
    Utf16Le,
    /// A WHATWG label understood by `encoding_rs`.
    Whatwg(&'static str),
    Table(&'static CodePage),
    Missing,
}

struct Entry {
    name: &'static str,
    aliases: &'static [&'static str],
    backend: Backend,
}

// IANA "Character Sets" registry, preferred MIME names first.
static REGISTRY: &[Entry] = &[
    Entry {
        name: "UTF-8",
        aliases: &["csUTF8"],
        backend: Backend::Utf8,
    },
    Entry {
        name: "US-ASCII",
        aliases: &[
            "iso-ir-6",
            "ANSI_X3.4-1968",
            "ANSI_X3.4-1986",
            "ISO_646.irv:1991",
            "ISO646-US",
            "us",
            "IBM367",
            "cp367",
            "csASCII",
            "ascii",
        ],
        backend: Backend::Ascii,
    },
    Entry {
        name: "ISO-8859-1",
        aliases: &[
            "ISO_8859-1:1987",
            "iso-ir-100",
            "ISO_8859-1",
            "latin1",
            "l1",
            "IBM819",
            "CP819",
            "csISOLatin1",
        ],
        backend: Backend::Latin1,
    },
    Entry {
        name: "ISO-8859-2",
        aliases: &["ISO_8859-2:1987", "iso-ir-101", "ISO_8859-2", "latin2", "l2", "csISOLatin2"],
        backend: Backend::Whatwg("iso-8859-2"),
    },
    Entry {
        name: "ISO-8859-3",
        aliases: &["ISO_8859-3:1988", "iso-ir-109", "ISO_8859-3", "latin3", "l3", "csISOLatin3"],
        backend: Backend::Whatwg("iso-8859-3"),
    },
    Entry {
        name: "ISO-8859-4",
        aliases: &["ISO_8859-4:1988", "iso-ir-110", "ISO_8859-4", "latin4", "l4", "csISOLatin4"],
        backend: Backend::Whatwg("iso-8859-4"),
    },
    Entry {
        name: "ISO-8859-5",
        aliases: &["ISO_8859-5:1988", "iso-ir-144", "ISO_8859-5", "cyrillic", "csISOLatinCyrillic"],
        backend: Backend::Whatwg("iso-8859-5"),
    },
    Entry {
        name: "ISO-8859-6",
        aliases: &[
            "ISO_8859-6:1987",
            "iso-ir-127",
            "ISO_8859-6",
            "ECMA-114",
            "ASMO-708",
            "arabic",
            "csISOLatinArabic",
        ],
        backend: Backend::Whatwg("iso-8859-6"),
    },
    Entry {
        name: "ISO-8859-7",
        aliases: &[
            "ISO_8859-7:1987",
            "iso-ir-126",
            "ISO_8859-7",
            "ELOT_928",
            "ECMA-118",
            "greek",
            "greek8",
            "csISOLatinGreek",
        ],
        backend: Backend::Whatwg("iso-8859-7"),
    },
    Entry {
        name: "ISO-8859-8",
        aliases: &["ISO_8859-8:1988", "iso-ir-138", "ISO_8859-8", "hebrew", "csISOLatinHebrew"],
        backend: Backend::Whatwg("iso-8859-8"),
    },
    Entry {
        name: "ISO-8859-8-I",
        aliases: &["ISO_8859-8-I", "csISO88598I"],
        backend: Backend::Whatwg("iso-8859-8-i"),
    },
    Entry {
        name: "ISO-8859-9",
        aliases: &["ISO_8859-9:1989", "iso-ir-148", "ISO_8859-9", "latin5", "l5", "csISOLatin5"],
        backend: Backend::Table(&code_page::LATIN_5),
    },
    Entry {
        name: "ISO-8859-10",
        aliases: &["iso-ir-157", "l6", "ISO_8859-10:1992", "csISOLatin6", "latin6"],
        backend: Backend::Whatwg("iso-8859-10"),
    },
    Entry {
        name: "ISO-8859-13",
        aliases: &["csISO885913"],
        backend: Backend::Whatwg("iso-8859-13"),
    },
    Entry {
        name: "ISO-8859-14",
        aliases: &[
            "iso-ir-199",
            "ISO_8859-14:1998",
            "ISO_8859-14",
            "latin8",
            "iso-celtic",
            "l8",
            "csISO885914",
        ],
        backend: Backend::Whatwg("iso-8859-14"),
    },
    Entry {
        name: "ISO-8859-15",
        aliases: &["ISO_8859-15", "Latin-9", "csISO885915"],
        backend: Backend::Whatwg("iso-8859-15"),
    },
    Entry {
        name: "ISO-8859-16",
        aliases: &["iso-ir-226", "ISO_8859-16:2001", "ISO_8859-16", "latin10", "l10", "csISO885916"],
        backend: Backend::Whatwg("iso-8859-16"),
    },
    Entry {
        name: "windows-874",
        aliases: &["cswindows874"],
        backend: Backend::Whatwg("windows-874"),
    },
    Entry {
        name: "windows-1250",
        aliases: &["cswindows1250"],
        backend: Backend::Whatwg("windows-1250"),
    },
    Entry {
        name: "windows-1251",
        aliases: &["cswindows1251"],
        backend: Backend::Whatwg("windows-1251"),
    },
    Entry {
        name: "windows-1252",
        aliases: &["cswindows1252"],
        backend: Backend::Whatwg("windows-1252"),
    },
    Entry {
        name: "windows-1253",
        aliases: &["cswindows1253"],
        backend: Backend::Whatwg("windows-1253"),
    },
    Entry {
        name: "windows-1254",
        aliases: &["cswindows1254"],
        backend: Backend::Whatwg("windows-1254"),
    },
    Entry {
        name: "windows-1255",
        aliases: &["cswindows1255"],
        backend: Backend::Whatwg("windows-1255"),
    },
    Entry {
        name: "windows-1256",
        aliases: &["cswindows1256"],
        backend: Backend::Whatwg("windows-1256"),
    },
    Entry {
        name: "windows-1257",
        aliases: &["cswindows1257"],
        backend: Backend::Whatwg("windows-1257"),
    },
    Entry {
        name: "windows-1258",
        aliases: &["cswindows1258"],
        backend: Backend::Whatwg("windows-1258"),
    },
    Entry {
        name: "KOI8-R",
        aliases: &["csKOI8R"],
        backend: Backend::Whatwg("koi8-r"),
    },
    Entry {
        name: "KOI8-U",
        aliases: &["csKOI8U"],
        backend: Backend::Whatwg("koi8-u"),
    },
    Entry {
        name: "macintosh",
        aliases: &["mac", "csMacintosh"],
        backend: Backend::Whatwg("macintosh"),
    },
    Entry {
        name: "IBM866",
        aliases: &["cp866", "866", "csIBM866"],
        backend: Backend::Whatwg("ibm866"),
    },
    Entry {
        name: "Shift_JIS",
        aliases: &["MS_Kanji", "csShiftJIS"],
        backend: Backend::Whatwg("shift_jis"),
    },
    Entry {
        name: "Windows-31J",
        aliases: &["csWindows31J"],
        backend: Backend::Whatwg("shift_jis"),
    },
    Entry {
        name: "EUC-JP",
        aliases: &["Extended_UNIX_Code_Packed_Format_for_Japanese", "csEUCPkdFmtJapanese"],
        backend: Backend::Whatwg("euc-jp"),
    },
    Entry {
        name: "ISO-2022-JP",
        aliases: &["csISO2022JP"],
        backend: Backend::Whatwg("iso-2022-jp"),
    },
    Entry {
        name: "GBK",
        aliases: &["CP936", "MS936", "windows-936", "csGBK"],
        backend: Backend::Whatwg("gbk"),
    },
    Entry {
        name: "GB2312",
        aliases: &["csGB2312"],
        backend: Backend::Whatwg("gbk"),
    },
    Entry {
        name: "GB18030",
        aliases: &["csGB18030"],
        backend: Backend::Whatwg("gb18030"),
    },
    Entry {
        name: "Big5",
        aliases: &["csBig5"],
        backend: Backend::Whatwg("big5"),
    },
    Entry {
        name: "Big5-HKSCS",
        aliases: &["csBig5HKSCS"],
        backend: Backend::Whatwg("big5"),
    },
    Entry {
        name: "EUC-KR",
        aliases: &["csEUCKR"],
        backend: Backend::Whatwg("euc-kr"),
    },
    Entry {
        name: "UTF-16BE",
        aliases: &["csUTF16BE"],
        backend: Backend::Utf16Be,
    },
    Entry {
        name: "UTF-16LE",
        aliases: &["csUTF16LE"],
        backend: Backend::Utf16Le,
    },
    // RFC 2781: unmarked UTF-16 is big-endian.
    Entry {
        name: "UTF-16",
        aliases: &["csUTF16"],
        backend: Backend::Utf16Be,
    },
    Entry {
        name: "UTF-7",
        aliases: &["csUTF7"],
        backend: Backend::Missing,
    },
    Entry {
        name: "UTF-32",
        aliases: &["csUTF32"],
        backend: Backend::Missing,
    },
    Entry {
        name: "UTF-32BE",
        aliases: &["csUTF32BE"],
        backend: Backend::Missing,
    },
    Entry {
        name: "UTF-32LE",
        aliases: &["csUTF32LE"],
        backend: Backend::Missing,
    },
    Entry {
        name: "CESU-8",
        aliases: &["csCESU8", "csCESU-8"],
        backend: Backend::Missing,
    },
    Entry {
        name: "SCSU",
        aliases: &["csSCSU"],
        backend: Backend::Missing,
    },
    Entry {
        name: "BOCU-1",
        aliases: &["csBOCU1", "csBOCU-1"],
        backend: Backend::Missing,
    },
    Entry {
        name: "ISO-2022-KR",
        aliases: &["csISO2022KR"],
        backend: Backend::Missing,
    },
    Entry {
        name: "ISO-2022-CN",
        aliases: &["csISO2022CN"],
        backend: Backend::Missing,
    },
    Entry {
        name: "ISO-2022-CN-EXT",
        aliases: &["csISO2022CNEXT"],
        backend: Backend::Missing,
    },
    Entry {
        name: "HZ-GB-2312",
        aliases: &[],
        backend: Backend::Missing,
    },
    Entry {
        name: "IBM037",
        aliases: &["cp037", "ebcdic-cp-us", "ebcdic-cp-ca", "ebcdic-cp-wt", "ebcdic-cp-nl", "csIBM037"],
        backend: Backend::Table(&code_page::IBM037),
    },
    Entry {
        name: "IBM273",
        aliases: &["CP273", "csIBM273"],
        backend: Backend::Missing,
    },
    Entry {
        name: "IBM500",
        aliases: &["CP500", "ebcdic-cp-be", "ebcdic-cp-ch", "csIBM500"],
        backend: Backend::Missing,
    },
    Entry {
        name: "IBM1047",
        aliases: &["IBM-1047", "csIBM1047"],
        backend: Backend::Table(&code_page::IBM1047),
    },
    Entry {
        name: "EBCDIC-US",
        aliases: &["csEBCDICUS"],
        backend: Backend::Missing,
    },
    Entry {
        name: "OSD_EBCDIC_DF03_IRV",
        aliases: &["csOSDEBCDICDF03IRV"],
        backend: Backend::Missing,
    },
    Entry {
        name: "OSD_EBCDIC_DF04_1",
        aliases: &["csOSDEBCDICDF041"],
        backend: Backend::Missing,
    },
    Entry {
        name: "OSD_EBCDIC_DF04_15",
        aliases: &["csOSDEBCDICDF0415"],
        backend: Backend::Missing,
    },
    Entry {
        name: "IBM437",
        aliases: &["cp437", "437", "csPC8CodePage437"],
        backend: Backend::Table(&code_page::IBM437),
    },
    Entry {
        name: "IBM850",
        aliases: &["cp850", "850", "csPC850Multilingual"],
        backend: Backend::Table(&code_page::IBM850),
    },
    Entry {
        name: "IBM852",
        aliases: &["cp852", "852", "csPCp852"],
        backend: Backend::Table(&code_page::IBM852),
    },
    // Registered, but nothing here can run them.
    unsupported("ISO_6937-2-add", &["iso-ir-142", "csISOTextComm"]),
    unsupported("JIS_X0201", &["X0201", "csHalfWidthKatakana"]),
    unsupported("JIS_Encoding", &["csJISEncoding"]),
    unsupported("Extended_UNIX_Code_Fixed_Width_for_Japanese", &["csEUCFixWidJapanese"]),
    unsupported("BS_4730", &["iso-ir-4", "ISO646-GB", "gb", "uk", "csISO4UnitedKingdom"]),
    unsupported("SEN_850200_C", &["iso-ir-11", "ISO646-SE2", "se2", "csISO11SwedishForNames"]),
    unsupported("IT", &["iso-ir-15", "ISO646-IT", "csISO15Italian"]),
    unsupported("ES", &["iso-ir-17", "ISO646-ES", "csISO17Spanish"]),
    unsupported("DIN_66003", &["iso-ir-21", "de", "ISO646-DE", "csISO21German"]),
    unsupported(
        "NS_4551-1",
        &[
            "iso-ir-60",
            "ISO646-NO",
            "no",
            "csISO60DanishNorwegian",
            "csISO60Norwegian1",
        ],
    ),
    unsupported("NF_Z_62-010", &["iso-ir-69", "ISO646-FR", "fr", "csISO69French"]),
    unsupported("ISO-10646-UTF-1", &["csISO10646UTF1"]),
    unsupported("ISO_646.basic:1983", &["ref", "csISO646basic1983"]),
    unsupported("INVARIANT", &["csINVARIANT"]),
    unsupported("ISO_646.irv:1983", &["iso-ir-2", "irv", "csISO2IntlRefVersion"]),
    unsupported("NATS-SEFI", &["iso-ir-8-1", "csNATSSEFI"]),
    unsupported("NATS-SEFI-ADD", &["iso-ir-8-2", "csNATSSEFIADD"]),
    unsupported("NATS-DANO", &["iso-ir-9-1", "csNATSDANO"]),
    unsupported("NATS-DANO-ADD", &["iso-ir-9-2", "csNATSDANOADD"]),
    unsupported(
        "SEN_850200_B",
        &[
            "iso-ir-10",
            "FI",
            "ISO646-FI",
            "ISO646-SE",
            "se",
            "csISO10Swedish",
        ],
    ),
    unsupported(
        "KS_C_5601-1987",
        &[
            "iso-ir-149",
            "KS_C_5601-1989",
            "KSC_5601",
            "korean",
            "csKSC56011987",
        ],
    ),
    unsupported("ISO-2022-JP-2", &["csISO2022JP2"]),
    unsupported(
        "JIS_C6220-1969-jp",
        &[
            "JIS_C6220-1969",
            "iso-ir-13",
            "katakana",
            "x0201-7",
            "csISO13JISC6220jp",
        ],
    ),
    unsupported("JIS_C6220-1969-ro", &["iso-ir-14", "jp", "ISO646-JP", "csISO14JISC6220ro"]),
    unsupported("PT", &["iso-ir-16", "ISO646-PT", "csISO16Portuguese"]),
    unsupported("greek7-old", &["iso-ir-18", "csISO18Greek7Old"]),
    unsupported("latin-greek", &["iso-ir-19", "csISO19LatinGreek"]),
    unsupported("NF_Z_62-010_(1973)", &["iso-ir-25", "ISO646-FR1", "csISO25French"]),
    unsupported("Latin-greek-1", &["iso-ir-27", "csISO27LatinGreek1"]),
    unsupported("ISO_5427", &["iso-ir-37", "csISO5427Cyrillic"]),
    unsupported("JIS_C6226-1978", &["iso-ir-42", "csISO42JISC62261978"]),
    unsupported("BS_viewdata", &["iso-ir-47", "csISO47BSViewdata"]),
    unsupported("INIS", &["iso-ir-49", "csISO49INIS"]),
    unsupported("INIS-8", &["iso-ir-50", "csISO50INIS8"]),
    unsupported("INIS-cyrillic", &["iso-ir-51", "csISO51INISCyrillic"]),
    unsupported("ISO_5427:1981", &["iso-ir-54", "ISO5427Cyrillic1981", "csISO54271981"]),
    unsupported("ISO_5428:1980", &["iso-ir-55", "csISO5428Greek"]),
    unsupported("GB_1988-80", &["iso-ir-57", "cn", "ISO646-CN", "csISO57GB1988"]),
    unsupported("GB_2312-80", &["iso-ir-58", "chinese", "csISO58GB231280"]),
    unsupported("NS_4551-2", &["ISO646-NO2", "iso-ir-61", "no2", "csISO61Norwegian2"]),
    unsupported("videotex-suppl", &["iso-ir-70", "csISO70VideotexSupp1"]),
    unsupported("PT2", &["iso-ir-84", "ISO646-PT2", "csISO84Portuguese2"]),
    unsupported("ES2", &["iso-ir-85", "ISO646-ES2", "csISO85Spanish2"]),
    unsupported("MSZ_7795.3", &["iso-ir-86", "ISO646-HU", "hu", "csISO86Hungarian"]),
    unsupported("JIS_C6226-1983", &["iso-ir-87", "x0208", "JIS_X0208-1983", "csISO87JISX0208"]),
    unsupported("greek7", &["iso-ir-88", "csISO88Greek7"]),
    unsupported("ASMO_449", &["ISO_9036", "arabic7", "iso-ir-89", "csISO89ASMO449"]),
    unsupported("iso-ir-90", &["csISO90"]),
    unsupported("JIS_C6229-1984-a", &["iso-ir-91", "jp-ocr-a", "csISO91JISC62291984a"]),
    unsupported(
        "JIS_C6229-1984-b",
        &[
            "iso-ir-92",
            "ISO646-JP-OCR-B",
            "jp-ocr-b",
            "csISO92JISC62991984b",
        ],
    ),
    unsupported("JIS_C6229-1984-b-add", &["iso-ir-93", "jp-ocr-b-add", "csISO93JIS62291984badd"]),
    unsupported("JIS_C6229-1984-hand", &["iso-ir-94", "jp-ocr-hand", "csISO94JIS62291984hand"]),
    unsupported(
        "JIS_C6229-1984-hand-add",
        &[
            "iso-ir-95",
            "jp-ocr-hand-add",
            "csISO95JIS62291984handadd",
        ],
    ),
    unsupported("JIS_C6229-1984-kana", &["iso-ir-96", "csISO96JISC62291984kana"]),
    unsupported("ISO_2033-1983", &["iso-ir-98", "e13b", "csISO2033"]),
    unsupported("ANSI_X3.110-1983", &["iso-ir-99", "CSA_T500-1983", "NAPLPS", "csISO99NAPLPS"]),
    unsupported("T.61-7bit", &["iso-ir-102", "csISO102T617bit"]),
    unsupported("T.61-8bit", &["T.61", "iso-ir-103", "csISO103T618bit"]),
    unsupported("ECMA-cyrillic", &["iso-ir-111", "KOI8-E", "csISO111ECMACyrillic"]),
    unsupported(
        "CSA_Z243.4-1985-1",
        &[
            "iso-ir-121",
            "ISO646-CA",
            "csa7-1",
            "csa71",
            "ca",
            "csISO121Canadian1",
        ],
    ),
    unsupported(
        "CSA_Z243.4-1985-2",
        &[
            "iso-ir-122",
            "ISO646-CA2",
            "csa7-2",
            "csa72",
            "csISO122Canadian2",
        ],
    ),
    unsupported("CSA_Z243.4-1985-gr", &["iso-ir-123", "csISO123CSAZ24341985gr"]),
    unsupported("ISO-8859-6-E", &["ISO_8859-6-E", "csISO88596E"]),
    unsupported("ISO-8859-6-I", &["ISO_8859-6-I", "csISO88596I"]),
    unsupported("T.101-G2", &["iso-ir-128", "csISO128T101G2"]),
    unsupported("ISO-8859-8-E", &["ISO_8859-8-E", "csISO88598E"]),
    unsupported("CSN_369103", &["iso-ir-139", "csISO139CSN369103"]),
    unsupported("JUS_I.B1.002", &["iso-ir-141", "ISO646-YU", "js", "yu", "csISO141JUSIB1002"]),
    unsupported("IEC_P27-1", &["iso-ir-143", "csISO143IECP271"]),
    unsupported("JUS_I.B1.003-serb", &["iso-ir-146", "serbian", "csISO146Serbian"]),
    unsupported("JUS_I.B1.003-mac", &["macedonian", "iso-ir-147", "csISO147Macedonian"]),
    unsupported("greek-ccitt", &["iso-ir-150", "csISO150", "csISO150GreekCCITT"]),
    unsupported("NC_NC00-10:81", &["cuba", "iso-ir-151", "ISO646-CU", "csISO151Cuba"]),
    unsupported("ISO_6937-2-25", &["iso-ir-152", "csISO6937Add"]),
    unsupported("GOST_19768-74", &["ST_SEV_358-88", "iso-ir-153", "csISO153GOST1976874"]),
    unsupported("ISO_8859-supp", &["iso-ir-154", "latin1-2-5", "csISO8859Supp"]),
    unsupported("ISO_10367-box", &["iso-ir-155", "csISO10367Box"]),
    unsupported("latin-lap", &["lap", "iso-ir-158", "csISO158Lap"]),
    unsupported("JIS_X0212-1990", &["x0212", "iso-ir-159", "csISO159JISX02121990"]),
    unsupported("DS_2089", &["DS2089", "ISO646-DK", "dk", "csISO646Danish"]),
    unsupported("us-dk", &["csUSDK"]),
    unsupported("dk-us", &["csDKUS"]),
    unsupported("KSC5636", &["ISO646-KR", "csKSC5636"]),
    unsupported("UNICODE-1-1-UTF-7", &["csUnicode11UTF7"]),
    unsupported("ISO-11548-1", &["ISO_11548-1", "ISO_TR_11548-1", "csISO115481"]),
    unsupported("KZ-1048", &["STRK1048-2002", "RK1048", "csKZ1048"]),
    unsupported("ISO-10646-UCS-2", &["csUnicode"]),
    unsupported("ISO-10646-UCS-4", &["csUCS4"]),
    unsupported("ISO-10646-UCS-Basic", &["csUnicodeASCII"]),
    unsupported("ISO-10646-Unicode-Latin1", &["csUnicodeLatin1", "ISO-10646"]),
    unsupported("ISO-10646-J-1", &["csUnicodeJapanese"]),
    unsupported("ISO-Unicode-IBM-1261", &["csUnicodeIBM1261"]),
    unsupported("ISO-Unicode-IBM-1268", &["csUnicodeIBM1268"]),
    unsupported("ISO-Unicode-IBM-1276", &["csUnicodeIBM1276"]),
    unsupported("ISO-Unicode-IBM-1264", &["csUnicodeIBM1264"]),
    unsupported("ISO-Unicode-IBM-1265", &["csUnicodeIBM1265"]),
    unsupported("UNICODE-1-1", &["csUnicode11"]),
    unsupported("UTF-7-IMAP", &["csUTF7IMAP"]),
    unsupported("ISO-8859-1-Windows-3.0-Latin-1", &["csWindows30Latin1"]),
    unsupported("ISO-8859-1-Windows-3.1-Latin-1", &["csWindows31Latin1"]),
    unsupported("ISO-8859-2-Windows-Latin-2", &["csWindows31Latin2"]),
    unsupported("ISO-8859-9-Windows-Latin-5", &["csWindows31Latin5"]),
    unsupported("hp-roman8", &["roman8", "r8", "csHPRoman8"]),
    unsupported("Adobe-Standard-Encoding", &["csAdobeStandardEncoding"]),
    unsupported("Ventura-US", &["csVenturaUS"]),
    unsupported("Ventura-International", &["csVenturaInternational"]),
    unsupported("DEC-MCS", &["dec", "csDECMCS"]),
    unsupported("PC8-Danish-Norwegian", &["csPC8DanishNorwegian"]),
    unsupported("IBM862", &["cp862", "862", "csPC862LatinHebrew"]),
    unsupported("PC8-Turkish", &["csPC8Turkish"]),
    unsupported("IBM-Symbols", &["csIBMSymbols"]),
    unsupported("IBM-Thai", &["csIBMThai"]),
    unsupported("HP-Legal", &["csHPLegal"]),
    unsupported("HP-Pi-font", &["csHPPiFont"]),
    unsupported("HP-Math8", &["csHPMath8"]),
    unsupported("Adobe-Symbol-Encoding", &["csHPPSMath"]),
    unsupported("HP-DeskTop", &["csHPDesktop"]),
    unsupported("Ventura-Math", &["csVenturaMath"]),
    unsupported("Microsoft-Publishing", &["csMicrosoftPublishing"]),
    unsupported("IBM038", &["EBCDIC-INT", "cp038", "csIBM038"]),
    unsupported("IBM274", &["EBCDIC-BE", "CP274", "csIBM274"]),
    unsupported("IBM275", &["EBCDIC-BR", "cp275", "csIBM275"]),
    unsupported("IBM277", &["EBCDIC-CP-DK", "EBCDIC-CP-NO", "csIBM277"]),
    unsupported("IBM278", &["CP278", "ebcdic-cp-fi", "ebcdic-cp-se", "csIBM278"]),
    unsupported("IBM280", &["CP280", "ebcdic-cp-it", "csIBM280"]),
    unsupported("IBM281", &["EBCDIC-JP-E", "cp281", "csIBM281"]),
    unsupported("IBM284", &["CP284", "ebcdic-cp-es", "csIBM284"]),
    unsupported("IBM285", &["CP285", "ebcdic-cp-gb", "csIBM285"]),
    unsupported("IBM290", &["cp290", "EBCDIC-JP-kana", "csIBM290"]),
    unsupported("IBM297", &["cp297", "ebcdic-cp-fr", "csIBM297"]),
    unsupported("IBM420", &["cp420", "ebcdic-cp-ar1", "csIBM420"]),
    unsupported("IBM423", &["cp423", "ebcdic-cp-gr", "csIBM423"]),
    unsupported("IBM424", &["cp424", "ebcdic-cp-he", "csIBM424"]),
    unsupported("IBM851", &["cp851", "851", "csIBM851"]),
    unsupported("IBM855", &["cp855", "855", "csIBM855"]),
    unsupported("IBM857", &["cp857", "857", "csIBM857"]),
    unsupported("IBM860", &["cp860", "860", "csIBM860"]),
    unsupported("IBM861", &["cp861", "861", "cp-is", "csIBM861"]),
    unsupported("IBM863", &["cp863", "863", "csIBM863"]),
    unsupported("IBM864", &["cp864", "csIBM864"]),
    unsupported("IBM865", &["cp865", "865", "csIBM865"]),
    unsupported("IBM868", &["CP868", "cp-ar", "csIBM868"]),
    unsupported("IBM869", &["cp869", "869", "cp-gr", "csIBM869"]),
    unsupported("IBM870", &["CP870", "ebcdic-cp-roece", "ebcdic-cp-yu", "csIBM870"]),
    unsupported("IBM871", &["CP871", "ebcdic-cp-is", "csIBM871"]),
    unsupported("IBM880", &["cp880", "EBCDIC-Cyrillic", "csIBM880"]),
    unsupported("IBM891", &["cp891", "csIBM891"]),
    unsupported("IBM903", &["cp903", "csIBM903"]),
    unsupported("IBM904", &["cp904", "904", "csIBBM904"]),
    unsupported("IBM905", &["CP905", "ebcdic-cp-tr", "csIBM905"]),
    unsupported("IBM918", &["CP918", "ebcdic-cp-ar2", "csIBM918"]),
    unsupported("IBM1026", &["CP1026", "csIBM1026"]),
    unsupported("EBCDIC-AT-DE", &["csIBMEBCDICATDE"]),
    unsupported("EBCDIC-AT-DE-A", &["csEBCDICATDEA"]),
    unsupported("EBCDIC-CA-FR", &["csEBCDICCAFR"]),
    unsupported("EBCDIC-DK-NO", &["csEBCDICDKNO"]),
    unsupported("EBCDIC-DK-NO-A", &["csEBCDICDKNOA"]),
    unsupported("EBCDIC-FI-SE", &["csEBCDICFISE"]),
    unsupported("EBCDIC-FI-SE-A", &["csEBCDICFISEA"]),
    unsupported("EBCDIC-FR", &["csEBCDICFR"]),
    unsupported("EBCDIC-IT", &["csEBCDICIT"]),
    unsupported("EBCDIC-PT", &["csEBCDICPT"]),
    unsupported("EBCDIC-ES", &["csEBCDICES"]),
    unsupported("EBCDIC-ES-A", &["csEBCDICESA"]),
    unsupported("EBCDIC-ES-S", &["csEBCDICESS"]),
    unsupported("EBCDIC-UK", &["csEBCDICUK"]),
    unsupported("UNKNOWN-8BIT", &["csUnknown8BiT"]),
    unsupported("MNEMONIC", &["csMnemonic"]),
    unsupported("MNEM", &["csMnem"]),
    unsupported("VISCII", &["csVISCII"]),
    unsupported("VIQR", &["csVIQR"]),
    unsupported("IBM775", &["cp775", "csPC775Baltic"]),
    unsupported("IBM00858", &["CCSID00858", "CP00858", "PC-Multilingual-850+euro", "csIBM00858"]),
    unsupported("IBM00924", &["CCSID00924", "CP00924", "ebcdic-Latin9--euro", "csIBM00924"]),
    unsupported("IBM01140", &["CCSID01140", "CP01140", "ebcdic-us-37+euro", "csIBM01140"]),
    unsupported("IBM01141", &["CCSID01141", "CP01141", "ebcdic-de-273+euro", "csIBM01141"]),
    unsupported(
        "IBM01142",
        &[
            "CCSID01142",
            "CP01142",
            "ebcdic-dk-277+euro",
            "ebcdic-no-277+euro",
            "csIBM01142",
        ],
    ),
    unsupported(
        "IBM01143",
        &[
            "CCSID01143",
            "CP01143",
            "ebcdic-fi-278+euro",
            "ebcdic-se-278+euro",
            "csIBM01143",
        ],
    ),
    unsupported("IBM01144", &["CCSID01144", "CP01144", "ebcdic-it-280+euro", "csIBM01144"]),
    unsupported("IBM01145", &["CCSID01145", "CP01145", "ebcdic-es-284+euro", "csIBM01145"]),
    unsupported("IBM01146", &["CCSID01146", "CP01146", "ebcdic-gb-285+euro", "csIBM01146"]),
    unsupported("IBM01147", &["CCSID01147", "CP01147", "ebcdic-fr-297+euro", "csIBM01147"]),
    unsupported(
        "IBM01148",
        &[
            "CCSID01148",
            "CP01148",
            "ebcdic-international-500+euro",
            "csIBM01148",
        ],
    ),
    unsupported("IBM01149", &["CCSID01149", "CP01149", "ebcdic-is-871+euro", "csIBM01149"]),
    unsupported("PTCP154", &["csPTCP154", "PT154", "CP154", "Cyrillic-Asian"]),
    unsupported("Amiga-1251", &["Ami1251", "Amiga1251", "Ami-1251", "csAmiga1251"]),
    unsupported("KOI7-switched", &["csKOI7switched"]),
    unsupported("BRF", &["csBRF"]),
    unsupported("TSCII", &["csTSCII"]),
    unsupported("CP51932", &["csCP51932"]),
    unsupported("CP50220", &["csCP50220"]),
    unsupported("TIS-620", &["csTIS620", "ISO-8859-11"]),
];

const fn unsupported(name: &'static str, aliases: &'static [&'static str]) -> Entry {
    Entry {
        name,
        aliases,
        backend: Backend::Missing,
    }
}

/// Whether `name` selects the identity transform (empty or "utf-8").
pub fn is_utf8_name(name: &str) -> bool {
    name.is_empty() || name.eq_ignore_ascii_case("utf-8")
}

pub fn resolve(name: &str) -> Result<Charset, Error> {
    if is_utf8_name(name) {
        return Ok(Charset::Utf8);
    }
    let Some(entry) = lookup(name) else {
        return Err(Error::new(ErrorKind::UnknownCharset)
            .with_message("invalid encoding name")
            .with_charset(name));
    };
    let charset = match entry.backend {
        Backend::Utf8 => Some(Charset::Utf8),
        Backend::Ascii => Some(Charset::Ascii),
        Backend::Latin1 => Some(Charset::Latin1),
        Backend::Utf16Be => Some(Charset::Utf16Be),
        Backend::Utf16Le => Some(Charset::Utf16Le),
        Backend::Whatwg(label) => {
            Encoding::for_label_no_replacement(label.as_bytes()).map(Charset::Legacy)
        }
        Backend::Table(page) => Some(Charset::CodePage(page)),
        Backend::Missing => None,
    };
    let charset = charset.ok_or_else(|| {
        Error::new(ErrorKind::UnsupportedCharset)
            .with_message("unsupported encoding")
            .with_charset(entry.name)
    })?;
    tracing::debug!(requested = name, charset = charset.name(), "resolved charset");
    Ok(charset)
}

fn lookup(name: &str) -> Option<&'static Entry> {
    REGISTRY.iter().find(|entry| {
        entry.name.eq_ignore_ascii_case(name)
            || entry
                .aliases
                .iter()
                .any(|alias| alias.eq_ignore_ascii_case(name))
    })
}

impl Charset {
    pub fn name(&self) -> &'static str {
        match self {
            Charset::Utf8 => "UTF-8",
            Charset::Ascii => "US-ASCII",
            Charset::Latin1 => "ISO-8859-1",
            Charset::Utf16Be => "UTF-16BE",
            Charset::Utf16Le => "UTF-16LE",
            Charset::Legacy(encoding) => encoding.name(),
            Charset::CodePage(page) => page.name(),
        }
    }

    pub fn is_utf8(&self) -> bool {
        matches!(self, Charset::Utf8)
    }

    pub fn new_encoder(&self) -> CharsetEncoder {
        let inner = match self {
            Charset::Utf8 => EncoderInner::Utf8,
            Charset::Ascii => EncoderInner::Narrow { max: 0x7f },
            Charset::Latin1 => EncoderInner::Narrow { max: 0xff },
            Charset::Utf16Be => EncoderInner::Utf16 { big_endian: true },
            Charset::Utf16Le => EncoderInner::Utf16 { big_endian: false },
            Charset::Legacy(encoding) => EncoderInner::Whatwg(encoding.new_encoder()),
            Charset::CodePage(page) => EncoderInner::Table(page),
        };
        CharsetEncoder { inner }
    }

    /// Decodes the whole buffer to UTF-8, failing on the first malformed or truncated sequence.
    pub fn decode<'a>(&self, bytes: &'a [u8]) -> Result<Cow<'a, str>, Error> {
        match self {
            Charset::Utf8 => std::str::from_utf8(bytes)
                .map(Cow::Borrowed)
                .map_err(|err| self.malformed(err.valid_up_to())),
            Charset::Ascii => match bytes.iter().position(|byte| !byte.is_ascii()) {
                Some(offset) => Err(self.malformed(offset)),
                None => std::str::from_utf8(bytes)
                    .map(Cow::Borrowed)
                    .map_err(|err| self.malformed(err.valid_up_to())),
            },
            Charset::Latin1 => Ok(encoding_rs::mem::decode_latin1(bytes)),
            Charset::Utf16Be => self.decode_with(encoding_rs::UTF_16BE, bytes),
            Charset::Utf16Le => self.decode_with(encoding_rs::UTF_16LE, bytes),
            Charset::Legacy(encoding) => self.decode_with(*encoding, bytes),
            Charset::CodePage(page) => Ok(Cow::Owned(page.decode(bytes))),
        }
    }

    fn decode_with<'a>(
        &self,
        encoding: &'static Encoding,
        bytes: &'a [u8],
    ) -> Result<Cow<'a, str>, Error> {
        let mut decoder = encoding.new_decoder_without_bom_handling();
        let capacity = decoder
            .max_utf8_buffer_length_without_replacement(bytes.len())
            .ok_or_else(|| {
                Error::new(ErrorKind::Internal)
                    .with_message("input too large to decode")
                    .with_charset(self.name())
            })?;
        let mut out = String::with_capacity(capacity);
        let (result, read) = decoder.decode_to_string_without_replacement(bytes, &mut out, true);
        match result {
            DecoderResult::InputEmpty => {
                tracing::debug!(charset = self.name(), read, "decoded body");
                Ok(Cow::Owned(out))
            }
            DecoderResult::Malformed(bad, after) => {
                Err(self.malformed(read - usize::from(bad) - usize::from(after)))
            }
            DecoderResult::OutputFull => Err(Error::new(ErrorKind::Internal)
                .with_message("decode buffer undersized")
                .with_charset(self.name())),
        }
    }

    fn malformed(&self, offset: usize) -> Error {
        Error::new(ErrorKind::Malformed)
            .with_message("malformed or truncated input")
            .with_charset(self.name())
            .with_offset(offset as u64)
    }
}

/// Outcome of one raw encode call.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum EncodeStatus {
    /// All of the input was encoded.
    InputEmpty,
    /// The character at the returned position has no representation in the charset.
    Unmappable(char),
}

/// A raw UTF-8 → charset encoder. Holds shift state for stateful charsets.
pub struct CharsetEncoder {
    inner: EncoderInner,
}

enum EncoderInner {
    Utf8,
    Narrow { max: u32 },
    Utf16 { big_endian: bool },
    Whatwg(encoding_rs::Encoder),
    Table(&'static CodePage),
}

impl CharsetEncoder {
    /// Encodes `src` onto `dst` and returns how many bytes of `src` were consumed.
    ///
    /// On `Unmappable` the consumed count stops at the first byte of the offending
    /// character, which is left for the caller. `last` finalizes stateful encoders
    /// once the input has been fully consumed.
    pub fn encode(&mut self, src: &str, dst: &mut Vec<u8>, last: bool) -> (EncodeStatus, usize) {
        match &mut self.inner {
            EncoderInner::Utf8 => {
                dst.extend_from_slice(src.as_bytes());
                (EncodeStatus::InputEmpty, src.len())
            }
            EncoderInner::Narrow { max } => {
                for (idx, ch) in src.char_indices() {
                    if u32::from(ch) > *max {
                        return (EncodeStatus::Unmappable(ch), idx);
                    }
                    dst.push(u32::from(ch) as u8);
                }
                (EncodeStatus::InputEmpty, src.len())
            }
            EncoderInner::Utf16 { big_endian } => {
                dst.reserve(src.len() * 2);
                for unit in src.encode_utf16() {
                    let bytes = if *big_endian {
                        unit.to_be_bytes()
                    } else {
                        unit.to_le_bytes()
                    };
                    dst.extend_from_slice(&bytes);
                }
                (EncodeStatus::InputEmpty, src.len())
            }
            EncoderInner::Whatwg(encoder) => encode_whatwg(encoder, src, dst, last),
            EncoderInner::Table(page) => {
                for (idx, ch) in src.char_indices() {
                    let Some(byte) = page.encode_char(ch) else {
                        return (EncodeStatus::Unmappable(ch), idx);
                    };
                    dst.push(byte);
                }
                (EncodeStatus::InputEmpty, src.len())
            }
        }
    }
}

fn encode_whatwg(
    encoder: &mut encoding_rs::Encoder,
    src: &str,
    dst: &mut Vec<u8>,
    last: bool,
) -> (EncodeStatus, usize) {
    let mut read = 0;
    loop {
        let remaining = src.len() - read;
        let needed = encoder
            .max_buffer_length_from_utf8_without_replacement(remaining)
            .unwrap_or(remaining);
        dst.reserve(needed.max(16));
        let (result, consumed) =
            encoder.encode_from_utf8_to_vec_without_replacement(&src[read..], dst, last);
        read += consumed;
        match result {
            EncoderResult::InputEmpty => return (EncodeStatus::InputEmpty, read),
            EncoderResult::OutputFull => continue,
            EncoderResult::Unmappable(ch) => {
                return (EncodeStatus::Unmappable(ch), read - ch.len_utf8());
            }
        }
    }
}
