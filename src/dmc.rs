//! The DMC stranded-cotton catalog: 489 threads in a fixed order, with LAB
//! values precomputed once.

use crate::color::{rgb_to_lab_batch, LabColor};
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// DMC thread color entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DmcColor {
    pub number: String,
    pub name: String,
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl DmcColor {
    pub fn rgb(&self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    pub fn hex(&self) -> String {
        rgb_to_hex(self.rgb())
    }
}

/// Read-only catalog with a LAB value per entry, in catalog order.
#[derive(Debug, Clone)]
pub struct DmcCatalog {
    colors: Vec<DmcColor>,
    labs: Vec<LabColor>,
}

static CACHED_CATALOG: OnceLock<DmcCatalog> = OnceLock::new();

impl DmcCatalog {
    /// Process-wide catalog, built on first use.
    pub fn global() -> &'static Self {
        CACHED_CATALOG.get_or_init(Self::new)
    }

    pub fn new() -> Self {
        let colors: Vec<DmcColor> = DMC_CATALOG
            .iter()
            .map(|(number, name, hex)| {
                let [r, g, b] = hex_to_rgb(hex);
                DmcColor {
                    number: number.to_string(),
                    name: name.to_string(),
                    r,
                    g,
                    b,
                }
            })
            .collect();

        let rgbs: Vec<[u8; 3]> = colors.iter().map(DmcColor::rgb).collect();
        let labs = rgb_to_lab_batch(&rgbs);

        Self { colors, labs }
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &DmcColor> {
        self.colors.iter()
    }

    pub fn colors(&self) -> &[DmcColor] {
        &self.colors
    }

    pub fn labs(&self) -> &[LabColor] {
        &self.labs
    }

    pub fn color(&self, index: usize) -> Option<&DmcColor> {
        self.colors.get(index)
    }

    /// Look up a thread by DMC number ("310", "B5200", "Ecru", ...).
    pub fn get(&self, number: &str) -> Option<&DmcColor> {
        let number = number.trim();
        self.colors
            .iter()
            .find(|c| c.number.eq_ignore_ascii_case(number))
    }
}

impl Default for DmcCatalog {
    fn default() -> Self {
        Self::new()
    }
}

/// Convert hex string to RGB tuple
pub fn hex_to_rgb(hex: &str) -> [u8; 3] {
    let hex = hex.trim_start_matches('#');
    if hex.len() < 6 {
        return [0, 0, 0];
    }
    let r = u8::from_str_radix(&hex[0..2], 16).unwrap_or(0);
    let g = u8::from_str_radix(&hex[2..4], 16).unwrap_or(0);
    let b = u8::from_str_radix(&hex[4..6], 16).unwrap_or(0);
    [r, g, b]
}

/// Convert RGB to hex string
pub fn rgb_to_hex(rgb: [u8; 3]) -> String {
    format!("#{:02X}{:02X}{:02X}", rgb[0], rgb[1], rgb[2])
}

/// Each entry: (number, name, hex). Classic table first, then the 2017 colors 01-35.
const DMC_CATALOG: &[(&str, &str, &str)] = &[
    ("3713", "Salmon Very Light", "#FFE2E2"),
    ("761", "Salmon Light", "#FFC9C9"),
    ("760", "Salmon", "#F5ADAD"),
    ("3712", "Salmon Medium", "#F18787"),
    ("3328", "Salmon Dark", "#E36D6D"),
    ("347", "Salmon Very Dark", "#BF2D2D"),
    ("353", "Peach", "#FED7CC"),
    ("352", "Coral Light", "#FD9C97"),
    ("351", "Coral", "#E96A67"),
    ("350", "Coral Medium", "#E04848"),
    ("349", "Coral Dark", "#D21035"),
    ("817", "Coral Red Very Dark", "#BB051F"),
    ("3708", "Melon Light", "#FFCBD5"),
    ("3706", "Melon Medium", "#FFADBC"),
    ("3705", "Melon Dark", "#FF7992"),
    ("3801", "Melon Very Dark", "#E74967"),
    ("666", "Bright Red", "#E31D42"),
    ("321", "Red", "#C72B3B"),
    ("304", "Red Medium", "#B71F33"),
    ("498", "Red Dark", "#A7132B"),
    ("816", "Garnet", "#970B23"),
    ("815", "Garnet Medium", "#87071F"),
    ("814", "Garnet Dark", "#7B001B"),
    ("894", "Carnation Very Light", "#FFB2BB"),
    ("893", "Carnation Light", "#FC90A2"),
    ("892", "Carnation Medium", "#FF798C"),
    ("891", "Carnation Dark", "#FF5773"),
    ("818", "Baby Pink", "#FFDFD9"),
    ("957", "Geranium Pale", "#FDB5B5"),
    ("956", "Geranium", "#FF9191"),
    ("309", "Rose Dark", "#564A4A"),
    ("963", "Dusty Rose Ultra Very Light", "#FFD7D7"),
    ("3716", "Dusty Rose Medium Very Light", "#FFBDBD"),
    ("962", "Dusty Rose Medium", "#E68A8A"),
    ("961", "Dusty Rose Dark", "#CF7373"),
    ("3833", "Raspberry Light", "#EA8699"),
    ("3832", "Raspberry Medium", "#DB556E"),
    ("3831", "Raspberry Dark", "#B32F48"),
    ("777", "Raspberry Very Dark", "#913546"),
    ("819", "Baby Pink Light", "#FFEEEB"),
    ("3326", "Rose Light", "#FBADB4"),
    ("776", "Pink Medium", "#FCB0B9"),
    ("899", "Rose Medium", "#F27688"),
    ("335", "Rose", "#EE546E"),
    ("326", "Rose Very Dark", "#B33B4B"),
    ("151", "Dusty Rose Very Light", "#F0CED4"),
    ("3354", "Dusty Rose Light", "#E4A6AC"),
    ("3733", "Dusty Rose", "#E8879B"),
    ("3731", "Dusty Rose Very Dark", "#DA6783"),
    ("3350", "Dusty Rose Ultra Dark", "#BC4365"),
    ("150", "Dusty Rose Ultra Very Dark", "#AB0249"),
    ("3689", "Mauve Light", "#FBBFC2"),
    ("3688", "Mauve Medium", "#E7A9AC"),
    ("3687", "Mauve", "#C96B70"),
    ("3803", "Mauve Dark", "#AB3357"),
    ("3685", "Mauve Very Dark", "#881531"),
    ("605", "Cranberry Very Light", "#FFC0CD"),
    ("604", "Cranberry Light", "#FFB0BE"),
    ("603", "Cranberry", "#FFA4BE"),
    ("602", "Cranberry Medium", "#E24874"),
    ("601", "Cranberry Dark", "#D1286A"),
    ("600", "Cranberry Very Dark", "#CD2F63"),
    ("3806", "Cyclamen Pink Light", "#FF8CAE"),
    ("3805", "Cyclamen Pink", "#F3478B"),
    ("3804", "Cyclamen Pink Dark", "#E02876"),
    ("3609", "Plum Ultra Light", "#F4AED5"),
    ("3608", "Plum Very Light", "#EA9CC4"),
    ("3607", "Plum Light", "#C54989"),
    ("718", "Plum", "#9C2462"),
    ("917", "Plum Medium", "#9B1359"),
    ("915", "Plum Dark", "#820043"),
    ("225", "Shell Pink Ultra Very Light", "#FFDFD5"),
    ("224", "Shell Pink Very Light", "#EBB7AF"),
    ("152", "Shell Pink Medium Light", "#E2A099"),
    ("223", "Shell Pink Light", "#CC847C"),
    ("3722", "Shell Pink Medium", "#BC6C64"),
    ("3721", "Shell Pink Dark", "#A14B51"),
    ("221", "Shell Pink Very Dark", "#883E43"),
    ("778", "Antique Mauve Very Light", "#DFB3BB"),
    ("3727", "Antique Mauve Light", "#DBA9B2"),
    ("316", "Antique Mauve Medium", "#B7737F"),
    ("3726", "Antique Mauve Dark", "#9B5B66"),
    ("315", "Antique Mauve Medium Dark", "#814952"),
    ("3802", "Antique Mauve Very Dark", "#714149"),
    ("902", "Garnet Very Dark", "#822637"),
    ("3743", "Antique Violet Very Light", "#D7CBD3"),
    ("3042", "Antique Violet Light", "#B79DA7"),
    ("3041", "Antique Violet Medium", "#956F7C"),
    ("3740", "Antique Violet Dark", "#785762"),
    ("3836", "Grape Light", "#BA91AA"),
    ("3835", "Grape Medium", "#946083"),
    ("3834", "Grape Dark", "#72375D"),
    ("154", "Grape Very Dark", "#572433"),
    ("211", "Lavender Light", "#E3CBE3"),
    ("210", "Lavender Medium", "#C39FC3"),
    ("209", "Lavender Dark", "#A37BA7"),
    ("208", "Lavender Very Dark", "#835B8B"),
    ("3837", "Lavender Ultra Dark", "#6C3A6E"),
    ("327", "Violet Dark", "#633666"),
    ("153", "Violet Very Light", "#E6CCD9"),
    ("554", "Violet Light", "#DBB3CB"),
    ("553", "Violet", "#A3638B"),
    ("552", "Violet Medium", "#803A6B"),
    ("550", "Violet Very Dark", "#5C184E"),
    ("3747", "Blue Violet Very Light", "#D3D7ED"),
    ("341", "Blue Violet Light", "#B7BFDD"),
    ("156", "Blue Violet Medium Light", "#A3AED1"),
    ("340", "Blue Violet Medium", "#ADA7C7"),
    ("155", "Blue Violet Medium Dark", "#9891B6"),
    ("3746", "Blue Violet Dark", "#776B98"),
    ("333", "Blue Violet Very Dark", "#5C5478"),
    ("157", "Cornflower Blue Very Light", "#BBC3D9"),
    ("794", "Cornflower Blue Light", "#8F9CC1"),
    ("793", "Cornflower Blue Medium", "#707DA2"),
    ("3807", "Cornflower Blue", "#60678C"),
    ("792", "Cornflower Blue Dark", "#555B7B"),
    ("158", "Cornflower Blue Medium Very Dark", "#4C526E"),
    ("791", "Cornflower Blue Very Dark", "#464563"),
    ("3840", "Lavender Blue Light", "#B0C0DA"),
    ("3839", "Lavender Blue Medium", "#7B8EAB"),
    ("3838", "Lavender Blue Dark", "#5C7294"),
    ("800", "Delft Blue Pale", "#C0CCDE"),
    ("809", "Delft Blue", "#94A8C6"),
    ("799", "Delft Blue Medium", "#748EB6"),
    ("798", "Delft Blue Dark", "#466A8E"),
    ("797", "Royal Blue", "#13477D"),
    ("796", "Royal Blue Dark", "#11416D"),
    ("820", "Royal Blue Very Dark", "#0E365C"),
    ("162", "Blue Ultra Very Light", "#DBECF5"),
    ("827", "Blue Very Light", "#BDDDED"),
    ("813", "Blue Light", "#A1C2D7"),
    ("826", "Blue Medium", "#6B9EBF"),
    ("825", "Blue Dark", "#4781A5"),
    ("824", "Blue Very Dark", "#396987"),
    ("996", "Electric Blue Medium", "#30C2EC"),
    ("3843", "Electric Blue", "#14AAD0"),
    ("995", "Electric Blue Dark", "#2696B6"),
    ("3846", "Bright Turquoise Light", "#06E3E6"),
    ("3845", "Bright Turquoise Medium", "#04C4CA"),
    ("3844", "Bright Turquoise Dark", "#12AEBA"),
    ("159", "Blue Gray Light", "#C7CAD7"),
    ("160", "Blue Gray Medium", "#999FB7"),
    ("161", "Blue Gray", "#7880A4"),
    ("3756", "Baby Blue Ultra Very Light", "#EEFCFC"),
    ("775", "Baby Blue Very Light", "#D9EBF1"),
    ("3841", "Baby Blue Pale", "#CDDFED"),
    ("3325", "Baby Blue Light", "#B8D2E6"),
    ("3755", "Baby Blue", "#93B4CE"),
    ("334", "Baby Blue Medium", "#739FC1"),
    ("322", "Baby Blue Dark", "#5A8FB8"),
    ("312", "Baby Blue Very Dark", "#35668B"),
    ("803", "Baby Blue Ultra Very Dark", "#2C597C"),
    ("336", "Navy Blue", "#253B73"),
    ("823", "Navy Blue Dark", "#213063"),
    ("939", "Navy Blue Very Dark", "#1B2853"),
    ("3753", "Antique Blue Ultra Very Light", "#DBE2E9"),
    ("3752", "Antique Blue Very Light", "#C7D1DB"),
    ("932", "Antique Blue Light", "#A2B5C6"),
    ("931", "Antique Blue Medium", "#6A859E"),
    ("930", "Antique Blue Dark", "#455C71"),
    ("3750", "Antique Blue Very Dark", "#384C5E"),
    ("828", "Sky Blue Very Light", "#C5E8ED"),
    ("3761", "Sky Blue Light", "#ACD8E2"),
    ("519", "Sky Blue", "#7EB1C8"),
    ("518", "Wedgewood Light", "#4F93A7"),
    ("3760", "Wedgewood Medium", "#3E85A2"),
    ("517", "Wedgewood Dark", "#3B768F"),
    ("3842", "Wedgewood Very Dark", "#32667C"),
    ("311", "Wedgewood Ultra Very Dark", "#1C5066"),
    ("747", "Peacock Blue Very Light", "#E5FCFD"),
    ("3766", "Peacock Blue Light", "#99CFD9"),
    ("807", "Peacock Blue", "#64ABBA"),
    ("806", "Peacock Blue Dark", "#3D95A5"),
    ("3765", "Peacock Blue Very Dark", "#347F8C"),
    ("3811", "Turquoise Very Light", "#BCE3E6"),
    ("598", "Turquoise Light", "#90C3CC"),
    ("597", "Turquoise", "#5BA3B3"),
    ("3810", "Turquoise Dark", "#488E9A"),
    ("3809", "Turquoise Very Dark", "#3F7C85"),
    ("3808", "Turquoise Ultra Very Dark", "#366970"),
    ("928", "Gray Green Very Light", "#DDE3E3"),
    ("927", "Gray Green Light", "#BDCBCB"),
    ("926", "Gray Green Medium", "#98AEAE"),
    ("3768", "Gray Green Dark", "#657F7F"),
    ("924", "Gray Green Very Dark", "#566A6A"),
    ("3849", "Teal Green Light", "#52B3A4"),
    ("3848", "Teal Green Medium", "#559392"),
    ("3847", "Teal Green Dark", "#347D75"),
    ("964", "Sea Green Light", "#A9E2D8"),
    ("959", "Sea Green Medium", "#59C7B4"),
    ("958", "Sea Green Dark", "#3EB6A1"),
    ("3812", "Sea Green Very Dark", "#2F8C84"),
    ("3851", "Bright Green Light", "#49B3A1"),
    ("943", "Bright Green Medium", "#3D9384"),
    ("3850", "Bright Green Dark", "#378477"),
    ("993", "Aquamarine Very Light", "#90C0B4"),
    ("992", "Aquamarine Light", "#6FAE9F"),
    ("3814", "Aquamarine", "#508B7D"),
    ("991", "Aquamarine Dark", "#477B6E"),
    ("966", "Jade Ultra Very Light", "#B9D7C0"),
    ("564", "Jade Very Light", "#A7CDAF"),
    ("563", "Jade Light", "#8FC098"),
    ("562", "Jade Medium", "#53976A"),
    ("505", "Jade Green", "#338362"),
    ("3817", "Celadon Green Light", "#99C3AA"),
    ("3816", "Celadon Green", "#65A57D"),
    ("163", "Celadon Green Medium", "#4D8361"),
    ("3815", "Celadon Green Dark", "#477759"),
    ("561", "Celadon Green Very Dark", "#2C6A45"),
    ("504", "Blue Green Very Light", "#C4DECC"),
    ("3813", "Blue Green Light", "#B2D4BD"),
    ("503", "Blue Green Medium", "#7BAC94"),
    ("502", "Blue Green", "#5B9071"),
    ("501", "Blue Green Dark", "#396F52"),
    ("500", "Blue Green Very Dark", "#044D33"),
    ("955", "Nile Green Light", "#A2D6AD"),
    ("954", "Nile Green", "#88BA91"),
    ("913", "Nile Green Medium", "#6DAB77"),
    ("912", "Emerald Green Light", "#1B9D6B"),
    ("911", "Emerald Green Medium", "#189065"),
    ("910", "Emerald Green Dark", "#187E56"),
    ("909", "Emerald Green Very Dark", "#156F49"),
    ("3818", "Emerald Green Ultra Very Dark", "#115A3B"),
    ("369", "Pistachio Green Very Light", "#D7EDCC"),
    ("368", "Pistachio Green Light", "#A6C298"),
    ("320", "Pistachio Green Medium", "#69885A"),
    ("367", "Pistachio Green Dark", "#617A52"),
    ("319", "Pistachio Green Very Dark", "#205F2E"),
    ("890", "Pistachio Green Ultra Dark", "#174923"),
    ("164", "Forest Green Light", "#C8D8B8"),
    ("989", "Forest Green", "#8DA675"),
    ("988", "Forest Green Medium", "#738B5B"),
    ("987", "Forest Green Dark", "#587141"),
    ("986", "Forest Green Very Dark", "#405230"),
    ("772", "Yellow Green Very Light", "#E4ECD4"),
    ("3348", "Yellow Green Light", "#CCD9B1"),
    ("3347", "Yellow Green Medium", "#71935C"),
    ("3346", "Hunter Green", "#406A3A"),
    ("3345", "Hunter Green Dark", "#1B5915"),
    ("895", "Hunter Green Very Dark", "#1B5300"),
    ("704", "Bright Chartreuse", "#9ECF34"),
    ("703", "Chartreuse", "#7BB547"),
    ("702", "Kelly Green", "#47A72F"),
    ("701", "Green Light", "#3F8F29"),
    ("700", "Bright Green", "#07731B"),
    ("699", "Green", "#056517"),
    ("907", "Parrot Green Light", "#C7E666"),
    ("906", "Parrot Green Medium", "#7FB335"),
    ("905", "Parrot Green Dark", "#628A28"),
    ("904", "Parrot Green Very Dark", "#557822"),
    ("472", "Avocado Green Ultra Light", "#D8E498"),
    ("471", "Avocado Green Very Light", "#AEBF79"),
    ("470", "Avocado Green Light", "#94AB4F"),
    ("469", "Avocado Green", "#72843C"),
    ("937", "Avocado Green Medium", "#627133"),
    ("936", "Avocado Green Very Dark", "#4C5826"),
    ("935", "Avocado Green Dark", "#424D21"),
    ("934", "Avocado Green Black", "#313919"),
    ("523", "Fern Green Light", "#ABB197"),
    ("3053", "Green Gray", "#9CA482"),
    ("3052", "Green Gray Medium", "#889268"),
    ("3051", "Green Gray Dark", "#5F6648"),
    ("524", "Fern Green Very Light", "#C4CDAC"),
    ("522", "Fern Green", "#969E7E"),
    ("520", "Fern Green Dark", "#666D4F"),
    ("3364", "Pine Green", "#83975F"),
    ("3363", "Pine Green Medium", "#728256"),
    ("3362", "Pine Green Dark", "#5E6B47"),
    ("165", "Moss Green Very Light", "#EFF4A4"),
    ("3819", "Moss Green Light", "#E0E868"),
    ("166", "Moss Green Medium Light", "#C0C840"),
    ("581", "Moss Green", "#A7AE38"),
    ("580", "Moss Green Dark", "#888D33"),
    ("734", "Olive Green Light", "#C7C077"),
    ("733", "Olive Green Medium", "#BCB34C"),
    ("732", "Olive Green", "#948C36"),
    ("731", "Olive Green Dark", "#938B37"),
    ("730", "Olive Green Very Dark", "#827B30"),
    ("3013", "Khaki Green Light", "#B9B982"),
    ("3012", "Khaki Green Medium", "#A6A75D"),
    ("3011", "Khaki Green Dark", "#898A58"),
    ("372", "Mustard Light", "#CCB784"),
    ("371", "Mustard", "#BFA671"),
    ("370", "Mustard Medium", "#B89D64"),
    ("834", "Golden Olive Very Light", "#DBBE7F"),
    ("833", "Golden Olive Light", "#C8AB6C"),
    ("832", "Golden Olive", "#BD9B51"),
    ("831", "Golden Olive Medium", "#AA8F56"),
    ("830", "Golden Olive Dark", "#8D784B"),
    ("829", "Golden Olive Very Dark", "#7E6B42"),
    ("613", "Drab Brown Very Light", "#DCC4AA"),
    ("612", "Drab Brown Light", "#BC9A78"),
    ("611", "Drab Brown", "#967656"),
    ("610", "Drab Brown Dark", "#796047"),
    ("3047", "Yellow Beige Light", "#E7D6C1"),
    ("3046", "Yellow Beige Medium", "#D8BC9A"),
    ("3045", "Yellow Beige Dark", "#BC966A"),
    ("167", "Yellow Beige Very Dark", "#A77C49"),
    ("746", "Off White", "#FCFCEE"),
    ("677", "Old Gold Very Light", "#F5ECCB"),
    ("422", "Hazelnut Brown Light", "#C69F7B"),
    ("3828", "Hazelnut Brown", "#B78B61"),
    ("420", "Hazelnut Brown Dark", "#A07042"),
    ("869", "Hazelnut Brown Very Dark", "#835E39"),
    ("728", "Topaz", "#E4B468"),
    ("783", "Topaz Medium", "#CE9124"),
    ("782", "Topaz Dark", "#AE7720"),
    ("781", "Topaz Very Dark", "#A26D20"),
    ("780", "Topaz Ultra Very Dark", "#94631A"),
    ("676", "Old Gold Light", "#E5CE97"),
    ("729", "Old Gold Medium", "#D0A53E"),
    ("680", "Old Gold Dark", "#BC8D0E"),
    ("3829", "Old Gold Very Dark", "#A98204"),
    ("3822", "Straw Light", "#F6DC98"),
    ("3821", "Straw", "#F3CE75"),
    ("3820", "Straw Dark", "#DFB65F"),
    ("3852", "Straw Very Dark", "#CD9D37"),
    ("445", "Lemon Light", "#FFFB8B"),
    ("307", "Lemon", "#FDED54"),
    ("973", "Bright Canary", "#FFE300"),
    ("444", "Lemon Dark", "#FFD600"),
    ("3078", "Golden Yellow Very Light", "#FDF9CD"),
    ("727", "Topaz Very Light", "#FFF1AF"),
    ("726", "Topaz Light", "#FDD755"),
    ("725", "Topaz Medium Light", "#FFC840"),
    ("972", "Deep Canary", "#FFB515"),
    ("745", "Yellow Pale Light", "#FFE9AD"),
    ("744", "Yellow Pale", "#FFE793"),
    ("743", "Yellow Medium", "#FED376"),
    ("742", "Tangerine Light", "#FFBF57"),
    ("741", "Tangerine Medium", "#FFA32B"),
    ("740", "Tangerine", "#FF8B00"),
    ("970", "Pumpkin Light", "#F78B13"),
    ("971", "Pumpkin", "#F67F00"),
    ("947", "Burnt Orange", "#FF7B4D"),
    ("946", "Burnt Orange Medium", "#EB6307"),
    ("900", "Burnt Orange Dark", "#D15807"),
    ("967", "Apricot Very Light", "#FFDED5"),
    ("3824", "Apricot Light", "#FECDC2"),
    ("3341", "Apricot", "#FCAB98"),
    ("3340", "Apricot Medium", "#FF836F"),
    ("608", "Bright Orange", "#FD5D35"),
    ("606", "Bright Orange-Red", "#FA3203"),
    ("951", "Tawny Light", "#FFE2CF"),
    ("3856", "Mahogany Ultra Very Light", "#FFD3B5"),
    ("722", "Orange Spice Light", "#F7976F"),
    ("721", "Orange Spice Medium", "#F27842"),
    ("720", "Orange Spice Dark", "#E55C1F"),
    ("3825", "Pumpkin Pale", "#FDBD96"),
    ("922", "Copper Light", "#E27323"),
    ("921", "Copper", "#C66218"),
    ("920", "Copper Medium", "#AC5414"),
    ("919", "Red Copper", "#A64510"),
    ("918", "Red Copper Dark", "#82340A"),
    ("3770", "Tawny Very Light", "#FFEEE3"),
    ("945", "Tawny", "#FBD5BB"),
    ("402", "Mahogany Very Light", "#F7A777"),
    ("3776", "Mahogany Light", "#CF7939"),
    ("301", "Mahogany Medium", "#B35F2B"),
    ("400", "Mahogany Dark", "#8F430F"),
    ("300", "Mahogany Very Dark", "#6F2F00"),
    ("3823", "Yellow Ultra Pale", "#FFFDE3"),
    ("3855", "Autumn Gold Light", "#FAD396"),
    ("3854", "Autumn Gold Medium", "#F2AF68"),
    ("3853", "Autumn Gold Dark", "#F29746"),
    ("3827", "Golden Brown Pale", "#F7BB77"),
    ("977", "Golden Brown Light", "#DC9C56"),
    ("976", "Golden Brown Medium", "#C28142"),
    ("3826", "Golden Brown", "#AD7239"),
    ("975", "Golden Brown Dark", "#914F12"),
    ("948", "Peach Very Light", "#FEE7DA"),
    ("754", "Peach Light", "#F7CBBF"),
    ("3771", "Terra Cotta Ultra Very Light", "#F4BBA9"),
    ("758", "Terra Cotta Very Light", "#EEAA9B"),
    ("3778", "Terra Cotta Light", "#D98978"),
    ("356", "Terra Cotta Medium", "#C56A5B"),
    ("3830", "Terra Cotta", "#B95544"),
    ("355", "Terra Cotta Dark", "#984436"),
    ("3777", "Terra Cotta Very Dark", "#863022"),
    ("3779", "Rosewood Ultra Very Light", "#F8CAC8"),
    ("3859", "Rosewood Light", "#BA8B7C"),
    ("3858", "Rosewood Medium", "#964A3F"),
    ("3857", "Rosewood Dark", "#68251A"),
    ("3774", "Desert Sand Very Light", "#F3E1D7"),
    ("950", "Desert Sand Light", "#EED3C4"),
    ("3064", "Desert Sand", "#C48E70"),
    ("407", "Desert Sand Medium", "#BB8161"),
    ("3773", "Desert Sand Dark", "#B67552"),
    ("3772", "Desert Sand Very Dark", "#A06C50"),
    ("632", "Desert Sand Ultra Very Dark", "#875539"),
    ("453", "Shell Gray Light", "#D7CECB"),
    ("452", "Shell Gray Medium", "#C0B3AE"),
    ("451", "Shell Gray Dark", "#917B73"),
    ("3861", "Cocoa Light", "#A68881"),
    ("3860", "Cocoa", "#7D5D57"),
    ("779", "Cocoa Dark", "#624B45"),
    ("712", "Cream", "#FFFBEF"),
    ("739", "Tan Ultra Very Light", "#F8E4C8"),
    ("738", "Tan Very Light", "#ECCC9E"),
    ("437", "Tan Light", "#E4BB8E"),
    ("436", "Tan", "#CB9051"),
    ("435", "Brown Very Light", "#B87748"),
    ("434", "Brown Light", "#985E33"),
    ("433", "Brown Medium", "#7A451F"),
    ("801", "Coffee Brown Dark", "#653919"),
    ("898", "Coffee Brown Very Dark", "#492A13"),
    ("938", "Coffee Brown Ultra Dark", "#361F0E"),
    ("3371", "Black Brown", "#1E1108"),
    ("543", "Beige Brown Ultra Very Light", "#F2E3CE"),
    ("3864", "Mocha Beige Light", "#CBB69C"),
    ("3863", "Mocha Beige Medium", "#A4835C"),
    ("3862", "Mocha Beige Dark", "#8A6E4E"),
    ("3031", "Mocha Brown Very Dark", "#4B3C2A"),
    ("B5200", "Snow White", "#FFFFFF"),
    ("White", "White", "#FCFBF8"),
    ("3865", "Winter White", "#F9F7F1"),
    ("Ecru", "Ecru", "#F0EADA"),
    ("822", "Beige Gray Light", "#E7E2D3"),
    ("644", "Beige Gray Medium", "#DDD8CB"),
    ("642", "Beige Gray Dark", "#A49878"),
    ("640", "Beige Gray Very Dark", "#857B61"),
    ("3787", "Brown Gray Dark", "#625D50"),
    ("3021", "Brown Gray Very Dark", "#4F4B41"),
    ("3024", "Brown Gray Very Light", "#EBEAE7"),
    ("3023", "Brown Gray Light", "#B1AA97"),
    ("3022", "Brown Gray Medium", "#8E9078"),
    ("535", "Ash Gray Very Light", "#636458"),
    ("3033", "Mocha Brown Very Light", "#E3D8CC"),
    ("3782", "Mocha Brown Light", "#D2BCA6"),
    ("3032", "Mocha Brown Medium", "#B39F8B"),
    ("3790", "Beige Gray Ultra Dark", "#7F6A55"),
    ("3781", "Mocha Brown Dark", "#6B5743"),
    ("3866", "Mocha Brown Ultra Very Light", "#FAF6F0"),
    ("842", "Beige Brown Very Light", "#D1BAA1"),
    ("841", "Beige Brown Light", "#B69B7E"),
    ("840", "Beige Brown Medium", "#9A7C5C"),
    ("839", "Beige Brown Dark", "#675541"),
    ("838", "Beige Brown Very Dark", "#594937"),
    ("3072", "Beaver Gray Very Light", "#E6E8E8"),
    ("648", "Beaver Gray Light", "#BCB4AC"),
    ("647", "Beaver Gray Medium", "#B0A69C"),
    ("646", "Beaver Gray Dark", "#877D73"),
    ("645", "Beaver Gray Very Dark", "#6E655C"),
    ("844", "Beaver Gray Ultra Dark", "#484848"),
    ("762", "Pearl Gray Very Light", "#ECECEC"),
    ("415", "Pearl Gray", "#D3D3D6"),
    ("318", "Steel Gray Light", "#ABABAB"),
    ("414", "Steel Gray Dark", "#8C8C8C"),
    ("168", "Pewter Very Light", "#D1D1D1"),
    ("169", "Pewter Light", "#848484"),
    ("317", "Pewter Gray", "#6C6C6C"),
    ("413", "Pewter Gray Dark", "#565656"),
    ("3799", "Pewter Gray Very Dark", "#424242"),
    ("310", "Black", "#000000"),
    ("01", "White Tin", "#E3E3E6"),
    ("02", "Tin", "#D7D7D8"),
    ("03", "Medium Tin", "#B8B8BB"),
    ("04", "Dark Tin", "#AEAEB1"),
    ("05", "Light Driftwood", "#E3CCBE"),
    ("06", "Medium Light Driftwood", "#DCC6B8"),
    ("07", "Driftwood", "#8F7B6E"),
    ("08", "Dark Driftwood", "#6A5046"),
    ("09", "Very Dark Cocoa", "#55200E"),
    ("10", "Very Light Tender Green", "#EDFED9"),
    ("11", "Light Tender Green", "#E2EDB5"),
    ("12", "Tender Green", "#CDD99A"),
    ("13", "Medium Light Nile Green", "#BFF6E0"),
    ("14", "Pale Apple Green", "#D0FBB2"),
    ("15", "Apple Green", "#D1EDA4"),
    ("16", "Light Chartreuse", "#C9C258"),
    ("17", "Light Yellow Plum", "#E5E272"),
    ("18", "Yellow Plum", "#D9D56D"),
    ("19", "Medium Light Autumn Gold", "#F7C95F"),
    ("20", "Shrimp", "#F7AF93"),
    ("21", "Light Alizarin", "#D79982"),
    ("22", "Alizarin", "#BC604E"),
    ("23", "Apple Blossom", "#EDE2ED"),
    ("24", "White Lavender", "#E0D7EE"),
    ("25", "Ultra Light Lavender", "#DAD2E9"),
    ("26", "Pale Lavender", "#D7CAE6"),
    ("27", "White Violet", "#F0EEF9"),
    ("28", "Medium Light Eggplant", "#9086A9"),
    ("29", "Eggplant", "#674076"),
    ("30", "Medium Light Blueberry", "#7D77A5"),
    ("31", "Blueberry", "#50518D"),
    ("32", "Dark Blueberry", "#4D2E8A"),
    ("33", "Fuschia", "#9C599E"),
    ("34", "Dark Fuschia", "#7D3064"),
    ("35", "Very Dark Fuschia", "#46052D"),
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_hex_conversion() {
        assert_eq!(hex_to_rgb("#FF0000"), [255, 0, 0]);
        assert_eq!(hex_to_rgb("00FF00"), [0, 255, 0]);
        assert_eq!(hex_to_rgb("#12"), [0, 0, 0]);
        assert_eq!(rgb_to_hex([255, 128, 0]), "#FF8000");
    }

    #[test]
    fn catalog_has_489_unique_threads() {
        let catalog = DmcCatalog::new();
        assert_eq!(catalog.len(), 489);
        assert_eq!(catalog.labs().len(), 489);

        let numbers: HashSet<&str> = catalog.iter().map(|c| c.number.as_str()).collect();
        assert_eq!(numbers.len(), 489);
    }

    #[test]
    fn lookup_by_number() {
        let catalog = DmcCatalog::global();
        let black = catalog.get("310").expect("310 should exist");
        assert_eq!(black.name, "Black");
        assert_eq!(black.rgb(), [0, 0, 0]);

        let snow = catalog.get("b5200").expect("B5200 should exist");
        assert_eq!(snow.name, "Snow White");
        assert_eq!(snow.hex(), "#FFFFFF");

        assert!(catalog.get("9999").is_none());
    }

    #[test]
    fn order_is_stable() {
        let catalog = DmcCatalog::new();
        assert_eq!(catalog.color(0).map(|c| c.number.as_str()), Some("3713"));
        assert_eq!(catalog.color(453).map(|c| c.number.as_str()), Some("310"));
        assert_eq!(catalog.color(488).map(|c| c.number.as_str()), Some("35"));
    }
}
